//! Error taxonomy shared by the core and the front-ends.

use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::domain::StockNo;

/// Failures of in-memory portfolio operations. None of them mutate the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    #[error("stock #{0} is already in the portfolio")]
    DuplicateIdentifier(StockNo),

    #[error("stock #{0} is not in the portfolio")]
    NotFound(StockNo),

    #[error("invalid price {0}: prices must be non-negative")]
    InvalidPrice(Decimal),

    #[error("invalid share count {0}: must be at least one share")]
    InvalidShareCount(u32),

    #[error("stock #{0} would be worth more than $1000000000000000000")]
    ValueTooLarge(StockNo),
}

/// Failures of the CSV store.
///
/// `Unreadable` is recoverable: the caller keeps going with whatever was
/// loaded. `WriteFailed` must reach the user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read portfolio store {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("could not write portfolio store {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Boundary-layer parse failure for user-entered numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{input}' is not a valid {field}")]
    Malformed { field: &'static str, input: String },
}

/// Failure of a tracker action: either the mutation or the save after it.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
