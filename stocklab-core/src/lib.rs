//! StockLab Core — holdings, valuation, ranking, persistence and price feeds.
//!
//! This crate contains everything the front-ends share:
//! - Domain types (stock numbers, positions, the portfolio)
//! - Profit/loss ranking and totals reconciliation
//! - CSV store with missing/corrupt file fallback
//! - Injectable price feeds for simulated market moves
//! - Text report and chart data shaping
//! - A tracker session that re-persists after every mutation

pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod input;
pub mod report;
pub mod store;
pub mod tracker;

pub use chart::{ChartData, ComparisonPoint, ValueBar};
pub use config::{AppConfig, MarketConfig};
pub use domain::{Portfolio, Position, PriceMove, StockNo, Totals};
pub use error::{ConfigError, InputError, PortfolioError, StoreError, TrackerError};
pub use feed::{PriceFeed, RandomFeed, ScriptedFeed};
pub use report::Report;
pub use store::{CsvStore, Loaded};
pub use tracker::Tracker;
