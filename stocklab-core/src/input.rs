//! Parsing of user-entered numbers at the menu and command line.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::StockNo;
use crate::error::InputError;

pub fn parse_stock_no(raw: &str) -> Result<StockNo, InputError> {
    raw.parse().map_err(|_| malformed("stock number", raw))
}

pub fn parse_shares(raw: &str) -> Result<u32, InputError> {
    raw.trim().parse().map_err(|_| malformed("share count", raw))
}

/// Accepts an optional leading `$`. Sign is not checked here; the portfolio
/// rejects negative prices itself.
pub fn parse_price(raw: &str) -> Result<Decimal, InputError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    Decimal::from_str(digits).map_err(|_| malformed("price", raw))
}

/// `y`/`yes` in any case confirms; anything else declines.
pub fn is_confirmation(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn malformed(field: &'static str, raw: &str) -> InputError {
    InputError::Malformed {
        field,
        input: raw.trim().to_string(),
    }
}
