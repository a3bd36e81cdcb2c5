//! Domain types for StockLab

pub mod ids;
pub mod portfolio;
pub mod position;

pub use ids::StockNo;
pub use portfolio::{Portfolio, PriceMove, Totals};
pub use position::{Position, MAX_POSITION_VALUE, PRICE_SCALE};
