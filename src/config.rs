// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Price data configuration
    pub data: DataConfig,

    /// Form behaviour
    pub form: FormConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Price data configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Path of the CSV price table
    pub csv_path: String,

    /// Stock whose latest date seeds the default sell date
    pub default_stock: String,
}

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    /// Days between the default purchase date and the default sell date
    pub holding_days: i64,

    /// Largest quantity accepted by the quantity input
    pub max_quantity: Decimal,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let data_config = DataConfig {
            csv_path: env::var("STOCK_DATA_PATH").unwrap_or(defaults.data.csv_path),
            default_stock: env::var("DEFAULT_STOCK").unwrap_or(defaults.data.default_stock),
        };

        let form_config = FormConfig {
            holding_days: env::var("HOLDING_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.form.holding_days),
            max_quantity: env::var("MAX_QUANTITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.form.max_quantity),
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.logging.level),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            data: data_config,
            form: form_config,
            logging: logging_config,
        })
    }

    /// Swap invalid form settings for the defaults, handing back the validation error
    pub fn or_default_form(mut self) -> (Self, Option<AppError>) {
        match self.validate() {
            Ok(()) => (self, None),
            Err(e) => {
                self.form = Config::default().form;
                (self, Some(e))
            }
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| AppError::Config(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.form.max_quantity <= Decimal::ZERO {
            return Err(AppError::Config(format!(
                "MAX_QUANTITY must be positive, got {}",
                self.form.max_quantity
            )));
        }
        if self.form.holding_days < 0 {
            return Err(AppError::Config(format!(
                "HOLDING_DAYS must not be negative, got {}",
                self.form.holding_days
            )));
        }
        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // An unusable log file leaves logging on stderr
        let mut file_error = None;
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                match File::create(file_path) {
                    Ok(file) => {
                        builder.target(env_logger::Target::Pipe(Box::new(file)));
                    }
                    Err(e) => file_error = Some(format!("{}: {}", file_path, e)),
                }
            }
        }

        builder.init();

        if let Some(e) = file_error {
            log::warn!("Failed to create log file {}; logging to stderr", e);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                csv_path: "Transformed_Stock_Market_Dataset.csv".to_string(),
                default_stock: "Amazon".to_string(),
            },
            form: FormConfig {
                holding_days: 14,
                max_quantity: dec!(1000),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}
