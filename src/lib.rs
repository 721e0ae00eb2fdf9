// src/lib.rs
// Main library module declarations

pub mod config;
pub mod domain;
pub mod market_data;
pub mod trading;
pub mod ui;
