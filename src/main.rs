// src/main.rs
use stock_trade_calc::config::Config;
use stock_trade_calc::domain::errors::AppResult;
use stock_trade_calc::market_data::{CsvPriceLoader, PriceTableLoader};
use stock_trade_calc::ui::{TerminalForm, TradeForm};

fn main() -> AppResult<()> {
    // Load configuration, replacing unusable form settings with defaults
    let (config, rejected) = Config::from_env()?.or_default_form();

    // Initialize logging
    config.init_logging()?;
    if let Some(e) = rejected {
        log::warn!("{}; using default form settings", e);
    }

    log::info!("Starting stock_trade_calc v{}", env!("CARGO_PKG_VERSION"));
    let loader = CsvPriceLoader::new(&config.data.csv_path);
    log::info!("Reading prices from {}", loader.path().display());

    // A missing or unreadable file leaves the form usable with no stocks
    let table = loader.load_or_empty();

    let today = chrono::Local::now().date_naive();
    let form = TradeForm::with_defaults(&table, &config, today);

    TerminalForm::new(form).run()?;

    log::info!("Goodbye!");
    Ok(())
}
