// src/trading/calculator.rs
use crate::domain::errors::{TradingError, TradingResult};
use crate::domain::models::{PriceTable, TradeResult, TradeSelection, TradeStatus};
use rust_decimal::Decimal;

/// Values a trade selection against a loaded price table
pub struct TradeCalculator<'a> {
    table: &'a PriceTable,
}

impl<'a> TradeCalculator<'a> {
    pub fn new(table: &'a PriceTable) -> Self {
        Self { table }
    }

    /// Resolve both prices and classify the selection.
    ///
    /// Checks run in a fixed order and the first failing one wins: quantity,
    /// date order, then price availability for both, purchase and sell date.
    pub fn evaluate(&self, selection: &TradeSelection) -> TradingResult<TradeStatus> {
        let purchase_price = self
            .table
            .price_on(&selection.symbol, selection.purchase_date)?;
        let sell_price = self.table.price_on(&selection.symbol, selection.sell_date)?;

        let status = if selection.quantity.is_zero() {
            TradeStatus::MissingQuantity
        } else if selection.sell_date < selection.purchase_date {
            TradeStatus::SellBeforePurchase
        } else if purchase_price.is_zero() && sell_price.is_zero() {
            TradeStatus::NoDataForDates
        } else if purchase_price.is_zero() {
            TradeStatus::NoDataForPurchase
        } else if sell_price.is_zero() {
            TradeStatus::NoDataForSell
        } else {
            TradeStatus::Priced(price_trade(purchase_price, sell_price, selection.quantity)?)
        };

        Ok(status)
    }
}

/// Compute totals and profit for a quantity bought and sold at the given prices
pub fn price_trade(
    purchase_price: Decimal,
    sell_price: Decimal,
    quantity: Decimal,
) -> TradingResult<TradeResult> {
    let purchase_total = purchase_price
        .checked_mul(quantity)
        .ok_or(TradingError::Overflow("purchase total"))?;
    let sell_total = sell_price
        .checked_mul(quantity)
        .ok_or(TradingError::Overflow("sell total"))?;
    let profit = sell_total
        .checked_sub(purchase_total)
        .ok_or(TradingError::Overflow("profit"))?;

    Ok(TradeResult {
        purchase_price,
        sell_price,
        purchase_total,
        sell_total,
        profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProfitTone;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> PriceTable {
        let mut table = PriceTable::new();
        table.insert("Amazon", date(2024, 3, 1), dec!(100));
        table.insert("Amazon", date(2024, 3, 15), dec!(120));
        table.insert("Amazon", date(2024, 3, 20), dec!(90));
        table.insert("Amazon", date(2024, 3, 22), Decimal::ZERO);
        table
    }

    fn selection(buy: NaiveDate, sell: NaiveDate, quantity: Decimal) -> TradeSelection {
        TradeSelection {
            symbol: "Amazon".to_string(),
            purchase_date: buy,
            sell_date: sell,
            quantity,
        }
    }

    #[test]
    fn priced_trade_reports_totals_and_positive_profit() {
        let table = table();
        let calc = TradeCalculator::new(&table);
        let status = calc
            .evaluate(&selection(date(2024, 3, 1), date(2024, 3, 15), dec!(10)))
            .unwrap();

        let result = status.result().copied().unwrap();
        assert_eq!(result.purchase_total, dec!(1000));
        assert_eq!(result.sell_total, dec!(1200));
        assert_eq!(result.profit, dec!(200));
        assert_eq!(result.tone(), ProfitTone::Positive);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn losing_trade_is_negative() {
        let table = table();
        let calc = TradeCalculator::new(&table);
        let status = calc
            .evaluate(&selection(date(2024, 3, 15), date(2024, 3, 20), dec!(2.5)))
            .unwrap();

        let result = status.result().unwrap();
        assert_eq!(result.profit, dec!(-75));
        assert_eq!(result.tone(), ProfitTone::Negative);
    }

    #[test]
    fn same_day_trade_is_neutral() {
        let table = table();
        let calc = TradeCalculator::new(&table);
        let status = calc
            .evaluate(&selection(date(2024, 3, 1), date(2024, 3, 1), dec!(3)))
            .unwrap();

        assert_eq!(status.result().unwrap().tone(), ProfitTone::Neutral);
    }

    #[test]
    fn zero_quantity_wins_over_every_other_check() {
        let table = table();
        let calc = TradeCalculator::new(&table);

        for (buy, sell) in [
            (date(2024, 3, 1), date(2024, 3, 15)),
            (date(2024, 3, 15), date(2024, 3, 1)),
            (date(2020, 1, 1), date(2020, 1, 2)),
        ] {
            let status = calc.evaluate(&selection(buy, sell, Decimal::ZERO)).unwrap();
            assert_eq!(status, TradeStatus::MissingQuantity);
            assert_eq!(status.message(), Some("Please enter the quantity"));
        }
    }

    #[test]
    fn sell_before_purchase_is_rejected_regardless_of_prices() {
        let table = table();
        let calc = TradeCalculator::new(&table);

        for (buy, sell) in [
            (date(2024, 3, 15), date(2024, 3, 1)),
            (date(2021, 5, 5), date(2021, 5, 4)),
        ] {
            let status = calc.evaluate(&selection(buy, sell, dec!(1))).unwrap();
            assert_eq!(status, TradeStatus::SellBeforePurchase);
            assert_eq!(
                status.message(),
                Some("Sell date cannot be before purchase date")
            );
        }
    }

    #[test]
    fn missing_prices_map_to_no_data_messages() {
        let table = table();
        let calc = TradeCalculator::new(&table);

        let both = calc
            .evaluate(&selection(date(2024, 2, 1), date(2024, 2, 2), dec!(1)))
            .unwrap();
        assert_eq!(both, TradeStatus::NoDataForDates);

        let purchase = calc
            .evaluate(&selection(date(2024, 2, 1), date(2024, 3, 15), dec!(1)))
            .unwrap();
        assert_eq!(purchase, TradeStatus::NoDataForPurchase);

        // A stored zero behaves exactly like a missing row
        let sell = calc
            .evaluate(&selection(date(2024, 3, 1), date(2024, 3, 22), dec!(1)))
            .unwrap();
        assert_eq!(sell, TradeStatus::NoDataForSell);
        assert_eq!(sell.message(), Some("No data found for the sell date"));
    }

    #[test]
    fn unknown_stock_is_an_error() {
        let table = table();
        let calc = TradeCalculator::new(&table);
        let mut sel = selection(date(2024, 3, 1), date(2024, 3, 15), dec!(1));
        sel.symbol = "Netflix".to_string();

        assert!(matches!(
            calc.evaluate(&sel),
            Err(TradingError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let err = price_trade(Decimal::MAX, Decimal::ONE, dec!(2)).unwrap_err();
        assert!(matches!(err, TradingError::Overflow("purchase total")));
    }
}
