// src/domain/models.rs
use crate::domain::errors::{TradingError, TradingResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Closing prices of one stock keyed by calendar date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a price, replacing any earlier price for the same date
    pub fn insert(&mut self, date: NaiveDate, price: Decimal) {
        self.prices.insert(date, price);
    }

    /// Stored price, `None` when the date has no row
    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.get(&date).copied()
    }

    /// Price used for trade valuation. Missing dates read as zero.
    pub fn price_on(&self, date: NaiveDate) -> Decimal {
        self.get(date).unwrap_or(Decimal::ZERO)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// All loaded stocks. Symbols keep the column order of the source file.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    symbols: Vec<String>,
    series: HashMap<String, PriceSeries>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol with an empty series. Re-adding a known symbol is a no-op.
    pub fn add_symbol(&mut self, symbol: &str) {
        if !self.series.contains_key(symbol) {
            self.symbols.push(symbol.to_string());
            self.series.insert(symbol.to_string(), PriceSeries::new());
        }
    }

    pub fn insert(&mut self, symbol: &str, date: NaiveDate, price: Decimal) {
        self.add_symbol(symbol);
        if let Some(series) = self.series.get_mut(symbol) {
            series.insert(date, price);
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn series(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    /// Exact-date price lookup; an unknown symbol is an error, a missing date is zero
    pub fn price_on(&self, symbol: &str, date: NaiveDate) -> TradingResult<Decimal> {
        self.series
            .get(symbol)
            .map(|s| s.price_on(date))
            .ok_or_else(|| TradingError::UnknownSymbol(symbol.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// The user's current choice on the form
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSelection {
    pub symbol: String,
    pub purchase_date: NaiveDate,
    pub sell_date: NaiveDate,
    /// Zero means the quantity has not been entered yet
    pub quantity: Decimal,
}

impl TradeSelection {
    pub fn new(symbol: &str, purchase_date: NaiveDate, sell_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.to_string(),
            purchase_date,
            sell_date,
            quantity: Decimal::ZERO,
        }
    }
}

/// Totals of a priced trade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeResult {
    pub purchase_price: Decimal,
    pub sell_price: Decimal,
    pub purchase_total: Decimal,
    pub sell_total: Decimal,
    pub profit: Decimal,
}

impl TradeResult {
    pub fn tone(&self) -> ProfitTone {
        ProfitTone::of(self.profit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfitTone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl ProfitTone {
    pub fn of(profit: Decimal) -> Self {
        if profit > Decimal::ZERO {
            ProfitTone::Positive
        } else if profit < Decimal::ZERO {
            ProfitTone::Negative
        } else {
            ProfitTone::Neutral
        }
    }
}

/// Outcome of evaluating a selection, checked in declaration order
#[derive(Debug, Clone, PartialEq)]
pub enum TradeStatus {
    MissingQuantity,
    SellBeforePurchase,
    NoDataForDates,
    NoDataForPurchase,
    NoDataForSell,
    Priced(TradeResult),
}

impl TradeStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TradeStatus::MissingQuantity => Some("Please enter the quantity"),
            TradeStatus::SellBeforePurchase => Some("Sell date cannot be before purchase date"),
            TradeStatus::NoDataForDates => Some("No data found for the selected dates"),
            TradeStatus::NoDataForPurchase => Some("No data found for the purchase date"),
            TradeStatus::NoDataForSell => Some("No data found for the sell date"),
            TradeStatus::Priced(_) => None,
        }
    }

    pub fn result(&self) -> Option<&TradeResult> {
        match self {
            TradeStatus::Priced(result) => Some(result),
            _ => None,
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TradeStatus::Priced(r) => write!(f, "PRICED pnl={}", r.profit),
            other => write!(f, "{}", other.message().unwrap_or_default()),
        }
    }
}
