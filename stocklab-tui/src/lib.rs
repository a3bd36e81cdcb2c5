//! StockLab TUI — terminal charts for a portfolio.
//!
//! Two views over [`stocklab_core::ChartData`]:
//! - Portfolio values: one bar per stock, green for gains and pink for losses
//! - Investment vs current value: two lines across stocks in insertion order

pub mod charts;
pub mod theme;
pub mod viewer;

pub use theme::Theme;
pub use viewer::{run, ChartView, ViewerState};
