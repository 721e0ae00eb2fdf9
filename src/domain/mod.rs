// src/domain/mod.rs
pub mod errors;
pub mod models;

// Re-export common types for convenience
pub use errors::{
    AppError, AppResult, MarketDataError, MarketDataResult, TradingError, TradingResult,
};
pub use models::{
    PriceSeries, PriceTable, ProfitTone, TradeResult, TradeSelection, TradeStatus,
};
