//! CSV store — the flat file holding the portfolio between runs.
//!
//! Format: a header row `Stock No,Num Shares,Buy Price,Current Price`
//! followed by one row per position in canonical order. Numbers are plain
//! decimal text. Saving always rewrites the whole file.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{Portfolio, Position, StockNo};
use crate::error::StoreError;

/// Column names, in on-disk order.
pub const HEADER: [&str; 4] = ["Stock No", "Num Shares", "Buy Price", "Current Price"];

/// Result of loading the store.
///
/// A store that exists but cannot be read fully still yields the positions
/// parsed before the failure, with the failure kept as a warning.
#[derive(Debug)]
pub struct Loaded {
    pub portfolio: Portfolio,
    pub warning: Option<StoreError>,
}

/// Portfolio persisted as a CSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the portfolio. A missing file is an empty portfolio, not an error.
    pub fn load(&self) -> Loaded {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no portfolio store found, starting fresh");
                return Loaded {
                    portfolio: Portfolio::new(),
                    warning: None,
                };
            }
            Err(e) => {
                let warning = self.unreadable(e.to_string());
                tracing::warn!("{warning}");
                return Loaded {
                    portfolio: Portfolio::new(),
                    warning: Some(warning),
                };
            }
        };

        let (portfolio, failure) = read_positions(file);
        let warning = failure.map(|reason| self.unreadable(reason));
        match &warning {
            Some(w) => tracing::warn!(loaded = portfolio.len(), "{w}"),
            None => tracing::info!(
                path = %self.path.display(),
                positions = portfolio.len(),
                "loaded portfolio"
            ),
        }
        Loaded { portfolio, warning }
    }

    /// Overwrite the store with the given portfolio. Creates parent directories.
    pub fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, to_csv_string(portfolio)?)
        };
        write().map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "failed to save portfolio");
            StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::info!(
            path = %self.path.display(),
            positions = portfolio.len(),
            "saved portfolio"
        );
        Ok(())
    }

    fn unreadable(&self, reason: String) -> StoreError {
        StoreError::Unreadable {
            path: self.path.clone(),
            reason,
        }
    }
}

/// Serialize a portfolio to the store format.
pub fn to_csv_string(portfolio: &Portfolio) -> std::io::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;
    for position in portfolio {
        wtr.write_record(position.to_record())?;
    }
    let data = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(data).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Parse the store format, stopping at the first bad row.
///
/// Returns the positions read so far and, if reading stopped early, why.
pub fn read_positions<R: Read>(reader: R) -> (Portfolio, Option<String>) {
    let mut portfolio = Portfolio::new();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = match column_indices(&mut rdr) {
        Ok(columns) => columns,
        Err(reason) => return (portfolio, Some(reason)),
    };

    for (row, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => return (portfolio, Some(format!("line {line}: {e}"))),
        };
        let added = parse_row(&record, &columns)
            .and_then(|position| portfolio.add(position).map_err(|e| e.to_string()));
        if let Err(reason) = added {
            return (portfolio, Some(format!("line {line}: {reason}")));
        }
    }
    (portfolio, None)
}

/// Position of each [`HEADER`] column in the file's header row.
fn column_indices<R: Read>(rdr: &mut csv::Reader<R>) -> Result<[usize; 4], String> {
    let headers = rdr.headers().map_err(|e| format!("header: {e}"))?;
    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(HEADER) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format!("missing column '{name}'"))?;
    }
    Ok(indices)
}

fn parse_row(record: &csv::StringRecord, columns: &[usize; 4]) -> Result<Position, String> {
    let field = |i: usize| record.get(columns[i]).unwrap_or("");
    let stock_no = StockNo::from_str(field(0))
        .map_err(|e| format!("{} '{}': {e}", HEADER[0], field(0)))?;
    let shares = parse_shares(field(1))?;
    let buy_price = parse_decimal(HEADER[2], field(2))?;
    let current_price = parse_decimal(HEADER[3], field(3))?;
    Position::new(stock_no, shares, buy_price, current_price).map_err(|e| e.to_string())
}

/// Share counts written by older tools may carry a `.0` suffix.
fn parse_shares(raw: &str) -> Result<u32, String> {
    let trimmed = raw.strip_suffix(".0").unwrap_or(raw);
    trimmed
        .parse::<u32>()
        .map_err(|e| format!("{} '{raw}': {e}", HEADER[1]))
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| format!("{column} '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Portfolio {
        let mut portfolio = Portfolio::new();
        portfolio
            .add(Position::new(StockNo(1), 10, dec!(100), dec!(110)).unwrap())
            .unwrap();
        portfolio
            .add(Position::new(StockNo(2), 5, dec!(200.50), dec!(190.25)).unwrap())
            .unwrap();
        portfolio
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let csv = to_csv_string(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Stock No,Num Shares,Buy Price,Current Price");
        assert_eq!(lines[1], "1,10,100,110");
        assert_eq!(lines[2], "2,5,200.50,190.25");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn reads_back_what_it_writes() {
        let csv = to_csv_string(&sample()).unwrap();
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert!(failure.is_none());
        assert_eq!(portfolio, sample());
    }

    #[test]
    fn tolerates_spaced_header_and_float_text() {
        let csv = "Stock No, Num Shares, Buy Price, Current Price\n3, 4, 12.0, 13.5\n";
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert!(failure.is_none());
        let p = portfolio.find(StockNo(3)).unwrap();
        assert_eq!(p.shares(), 4);
        assert_eq!(p.buy_price(), dec!(12));
        assert_eq!(p.current_price(), dec!(13.5));
    }

    #[test]
    fn reordered_columns_are_matched_by_name() {
        let csv = "Current Price,Stock No,Buy Price,Num Shares\n9,1,8,2\n";
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert!(failure.is_none());
        let p = portfolio.find(StockNo(1)).unwrap();
        assert_eq!(p.shares(), 2);
        assert_eq!(p.current_price(), dec!(9));
    }

    #[test]
    fn stops_at_first_bad_row_keeping_earlier_rows() {
        let csv = "Stock No,Num Shares,Buy Price,Current Price\n1,10,100,110\n2,five,200,190\n3,1,1,1\n";
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert_eq!(portfolio.ids(), vec![StockNo(1)]);
        let reason = failure.unwrap();
        assert!(reason.starts_with("line 3"), "{reason}");
        assert!(reason.contains("Num Shares"), "{reason}");
    }

    #[test]
    fn duplicate_rows_are_a_failure() {
        let csv = "Stock No,Num Shares,Buy Price,Current Price\n1,10,100,110\n1,1,1,1\n";
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert_eq!(portfolio.len(), 1);
        assert!(failure.unwrap().contains("already in the portfolio"));
    }

    #[test]
    fn missing_column_is_a_failure() {
        let csv = "Stock No,Num Shares,Buy Price\n1,10,100\n";
        let (portfolio, failure) = read_positions(csv.as_bytes());
        assert!(portfolio.is_empty());
        assert!(failure.unwrap().contains("Current Price"));
    }

    #[test]
    fn empty_portfolio_writes_header_only() {
        let csv = to_csv_string(&Portfolio::new()).unwrap();
        assert_eq!(csv, "Stock No,Num Shares,Buy Price,Current Price\n");
    }
}
