// src/market_data/mod.rs
pub mod loader;

pub use loader::{read_price_table, CsvPriceLoader, PriceTableLoader};
