// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Trading error: {0}")]
    Trading(#[from] TradingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Failed to open price file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Price file has no stock columns")]
    MissingHeader,

    #[error("Unrecognised date: {0}")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Unknown stock: {0:?}")]
    UnknownSymbol(String),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type MarketDataResult<T> = Result<T, MarketDataError>;
pub type TradingResult<T> = Result<T, TradingError>;
