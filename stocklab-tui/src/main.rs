//! StockLab charts — open the chart viewer on a portfolio store.
//!
//! Usage: `stocklab-charts [STORE_PATH]` (defaults to `portfolio.csv`).

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use stocklab_core::{ChartData, CsvStore};

fn main() -> Result<()> {
    // Warnings only: anything printed after the alternate screen opens is lost.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("portfolio.csv"));

    let loaded = CsvStore::new(&path).load();
    if let Some(warning) = &loaded.warning {
        eprintln!("WARNING: {warning}");
    }

    stocklab_tui::run(ChartData::from_portfolio(&loaded.portfolio))
}
