// src/market_data/loader.rs
use crate::domain::errors::{MarketDataError, MarketDataResult};
use crate::domain::models::PriceTable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const HYPHEN_DATE_FORMAT: &str = "%d-%m-%Y";
const SLASH_DATE_FORMAT: &str = "%m/%d/%Y";

/// Source of the price table used by the form
pub trait PriceTableLoader {
    fn load(&self) -> MarketDataResult<PriceTable>;

    /// Load the table, degrading to an empty one when the source is unusable
    fn load_or_empty(&self) -> PriceTable {
        match self.load() {
            Ok(table) => table,
            Err(e) => {
                log::error!("Error reading data: {}", e);
                PriceTable::new()
            }
        }
    }
}

/// Reads a `Date, Stock1, Stock2, ...` price file from disk
pub struct CsvPriceLoader {
    path: PathBuf,
}

impl CsvPriceLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceTableLoader for CsvPriceLoader {
    fn load(&self) -> MarketDataResult<PriceTable> {
        let file = File::open(&self.path).map_err(|source| MarketDataError::Open {
            path: self.path.display().to_string(),
            source,
        })?;

        let table = read_price_table(file)?;
        log::info!(
            "Data loaded successfully: {} stocks from {}",
            table.len(),
            self.path.display()
        );
        log::info!("Stocks available: {:?}", table.symbols());
        Ok(table)
    }
}

/// Build a price table from CSV text. The first column holds the date, every
/// other column one stock.
pub fn read_price_table<R: Read>(reader: R) -> MarketDataResult<PriceTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let symbols: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    if symbols.is_empty() {
        return Err(MarketDataError::MissingHeader);
    }

    let mut table = PriceTable::new();
    for symbol in &symbols {
        table.add_symbol(symbol);
    }

    let mut skipped = 0usize;
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping malformed row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };

        let raw_date = record.get(0).unwrap_or_default();
        let date = match parse_date(raw_date) {
            Ok(date) => date,
            Err(e) => {
                log::warn!("Error parsing date: {} (row {})", e, line + 2);
                skipped += 1;
                continue;
            }
        };

        for (column, symbol) in symbols.iter().enumerate() {
            let price = parse_price(record.get(column + 1).unwrap_or_default());
            table.insert(symbol, date, price);
        }
    }

    if skipped > 0 {
        log::warn!("{} rows skipped while loading prices", skipped);
    }

    Ok(table)
}

/// Parse `DD-MM-YYYY` when the text contains a hyphen, `MM/DD/YYYY` otherwise
pub fn parse_date(raw: &str) -> MarketDataResult<NaiveDate> {
    let raw = raw.trim();
    let format = if raw.contains('-') {
        HYPHEN_DATE_FORMAT
    } else {
        SLASH_DATE_FORMAT
    };

    NaiveDate::parse_from_str(raw, format).map_err(|_| MarketDataError::InvalidDate(raw.to_string()))
}

/// Parse a price cell such as `1,234.56`. Anything unusable becomes the zero sentinel.
pub fn parse_price(raw: &str) -> Decimal {
    let cleaned = raw.trim().replace(',', "");
    match Decimal::from_str(&cleaned) {
        Ok(price) if price >= Decimal::ZERO => price,
        Ok(price) => {
            log::debug!("Negative price {} treated as missing", price);
            Decimal::ZERO
        }
        Err(_) => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn both_date_formats_key_the_same_calendar_day() {
        let csv = "Date,Apple\n02-01-2024,10\n01/03/2024,11\n";
        let table = read_price_table(csv.as_bytes()).unwrap();
        let apple = table.series("Apple").unwrap();

        assert_eq!(apple.get(date(2024, 1, 2)), Some(dec!(10)));
        assert_eq!(apple.get(date(2024, 1, 3)), Some(dec!(11)));
        assert_eq!(apple.len(), 2);
    }

    #[test]
    fn hyphen_is_day_first_and_slash_is_month_first() {
        assert_eq!(parse_date("05-04-2023").unwrap(), date(2023, 4, 5));
        assert_eq!(parse_date("05/04/2023").unwrap(), date(2023, 5, 4));
        assert_eq!(parse_date(" 1/9/2022 ").unwrap(), date(2022, 1, 9));
    }

    #[test]
    fn iso_dates_are_rejected() {
        assert!(matches!(
            parse_date("2024-02-02"),
            Err(MarketDataError::InvalidDate(_))
        ));
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(parse_price("1,234.56"), dec!(1234.56));
        assert_eq!(parse_price(" 2,000 "), dec!(2000));
    }

    #[test]
    fn unparseable_prices_become_zero() {
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("n/a"), Decimal::ZERO);
        assert_eq!(parse_price("-4.5"), Decimal::ZERO);
    }

    #[test]
    fn rows_with_bad_dates_are_skipped() {
        let csv = "Date,Apple,Tesla\nnot a date,1,2\n02-01-2024,\"1,500.25\",abc\n";
        let table = read_price_table(csv.as_bytes()).unwrap();

        let apple = table.series("Apple").unwrap();
        assert_eq!(apple.len(), 1);
        assert_eq!(apple.get(date(2024, 1, 2)), Some(dec!(1500.25)));
        assert_eq!(table.price_on("Tesla", date(2024, 1, 2)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let mut csv = b"Date,Apple\n02-01-2024,10\n03-01-2024,".to_vec();
        csv.extend_from_slice(&[0xff, 0xfe]);
        csv.extend_from_slice(b"\n04-01-2024,12\n");

        let table = read_price_table(csv.as_slice()).unwrap();
        let apple = table.series("Apple").unwrap();

        assert_eq!(apple.len(), 2);
        assert_eq!(apple.get(date(2024, 1, 2)), Some(dec!(10)));
        assert_eq!(apple.get(date(2024, 1, 3)), None);
        assert_eq!(apple.get(date(2024, 1, 4)), Some(dec!(12)));
    }

    #[test]
    fn header_names_are_trimmed_and_ordered() {
        let csv = "Date, Tesla, Apple\n02-01-2024, 5, 6\n";
        let table = read_price_table(csv.as_bytes()).unwrap();

        assert_eq!(table.symbols(), ["Tesla".to_string(), "Apple".to_string()]);
        assert_eq!(table.price_on("Apple", date(2024, 1, 2)).unwrap(), dec!(6));
    }

    #[test]
    fn short_rows_fill_missing_cells_with_zero() {
        let csv = "Date,Apple,Tesla\n02-01-2024,7\n";
        let table = read_price_table(csv.as_bytes()).unwrap();

        assert_eq!(table.price_on("Apple", date(2024, 1, 2)).unwrap(), dec!(7));
        assert_eq!(table.series("Tesla").unwrap().get(date(2024, 1, 2)), Some(Decimal::ZERO));
    }

    #[test]
    fn header_without_stocks_is_an_error() {
        let err = read_price_table("Date\n02-01-2024\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MarketDataError::MissingHeader));
    }

    #[test]
    fn missing_file_degrades_to_empty_table() {
        let loader = CsvPriceLoader::new("/definitely/not/here/prices.csv");
        assert!(matches!(loader.load(), Err(MarketDataError::Open { .. })));
        assert!(loader.load_or_empty().is_empty());
    }
}
