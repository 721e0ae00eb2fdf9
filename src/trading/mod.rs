// src/trading/mod.rs
pub mod calculator;

pub use calculator::{price_trade, TradeCalculator};
