// src/ui/form.rs
use crate::config::Config;
use crate::domain::models::{PriceTable, ProfitTone, TradeSelection, TradeStatus};
use crate::market_data::loader;
use crate::trading::calculator::TradeCalculator;
use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// What the form currently displays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormView {
    pub purchase_total: Decimal,
    pub sell_total: Decimal,
    pub profit: Decimal,
    pub tone: ProfitTone,
    pub message: Option<String>,
}

impl FormView {
    /// Priced trades show their totals, every other status shows its message over zeroed totals
    pub fn from_status(status: &TradeStatus) -> Self {
        match status.result() {
            Some(result) => Self {
                purchase_total: result.purchase_total,
                sell_total: result.sell_total,
                profit: result.profit,
                tone: ProfitTone::of(to_cents(result.profit)),
                message: None,
            },
            None => Self {
                message: status.message().map(str::to_string),
                ..Self::default()
            },
        }
    }

    pub fn purchase_label(&self) -> String {
        format!("Purchase Total: {:.2}", to_cents(self.purchase_total))
    }

    pub fn sell_label(&self) -> String {
        format!("Sell Total: {:.2}", to_cents(self.sell_total))
    }

    pub fn profit_label(&self) -> String {
        format!("PNL: {:.2}", to_cents(self.profit))
    }
}

/// Round to the two places shown on the form, halves away from zero
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Form state: the current selection plus the last good view
pub struct TradeForm<'a> {
    table: &'a PriceTable,
    selection: TradeSelection,
    view: FormView,
    max_quantity: Decimal,
}

impl<'a> TradeForm<'a> {
    pub fn new(table: &'a PriceTable, selection: TradeSelection, max_quantity: Decimal) -> Self {
        let mut form = Self {
            table,
            selection,
            view: FormView::default(),
            max_quantity,
        };
        form.refresh();
        form
    }

    /// Seed the form the way it opens: first stock, default dates, no quantity
    pub fn with_defaults(table: &'a PriceTable, config: &Config, today: NaiveDate) -> Self {
        let (purchase_date, sell_date) = default_dates(
            table,
            &config.data.default_stock,
            config.form.holding_days,
            today,
        );
        let symbol = table.symbols().first().cloned().unwrap_or_default();

        Self::new(
            table,
            TradeSelection::new(&symbol, purchase_date, sell_date),
            config.form.max_quantity,
        )
    }

    pub fn table(&self) -> &PriceTable {
        self.table
    }

    pub fn selection(&self) -> &TradeSelection {
        &self.selection
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn max_quantity(&self) -> Decimal {
        self.max_quantity
    }

    pub fn select_stock(&mut self, symbol: &str) {
        self.selection.symbol = symbol.to_string();
        self.refresh();
    }

    /// Quantities are clamped to `[0, max_quantity]` and kept to two decimal places
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.selection.quantity = to_cents(quantity.max(Decimal::ZERO).min(self.max_quantity));
        self.refresh();
    }

    pub fn set_purchase_date(&mut self, date: NaiveDate) {
        self.selection.purchase_date = date;
        self.refresh();
    }

    pub fn set_sell_date(&mut self, date: NaiveDate) {
        self.selection.sell_date = date;
        self.refresh();
    }

    /// Re-evaluate the selection. A failed evaluation is logged and the previous view kept.
    fn refresh(&mut self) {
        match TradeCalculator::new(self.table).evaluate(&self.selection) {
            Ok(status) => {
                log::debug!("{:?} -> {}", self.selection, status);
                self.view = FormView::from_status(&status);
            }
            Err(e) => log::error!("Error in recalculation: {}", e),
        }
    }
}

/// Default (purchase, sell) dates. The sell date is the last date of the
/// default stock, the purchase date `holding_days` before it; today's date
/// stands in when the stock has no data.
pub fn default_dates(
    table: &PriceTable,
    default_stock: &str,
    holding_days: i64,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let sell_date = match table.series(default_stock).and_then(|s| s.last_date()) {
        Some(date) => date,
        None => {
            log::warn!(
                "{} not found in the dataset. Available stocks: {:?}",
                default_stock,
                table.symbols()
            );
            today
        }
    };

    let days = Days::new(u64::try_from(holding_days).unwrap_or(0));
    let purchase_date = sell_date.checked_sub_days(days).unwrap_or(sell_date);
    (purchase_date, sell_date)
}

/// Accept `YYYY-MM-DD` as typed on the form, or either format of the price file
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| loader::parse_date(raw).ok())
}

/// Validate a typed quantity against the accepted range
pub fn parse_quantity(raw: &str, max_quantity: Decimal) -> Result<Decimal, String> {
    let quantity: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not a number", raw.trim()))?;

    if quantity < Decimal::ZERO || quantity > max_quantity {
        return Err(format!("Quantity must be between 0 and {}", max_quantity));
    }
    Ok(to_cents(quantity))
}
