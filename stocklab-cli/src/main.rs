//! StockLab CLI — personal stock portfolio tracker.
//!
//! Commands:
//! - `menu` (default) — interactive numbered menu
//! - `add` / `update-price` / `remove` — one-shot edits, saved immediately
//! - `show` — ranked report with totals, as text or JSON
//! - `simulate` — random market move on one stock or all of them
//! - `chart` — value and investment charts in the terminal

mod commands;
mod logging;
mod menu;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use stocklab_core::input;
use stocklab_core::{AppConfig, CsvStore, StockNo, Tracker};

#[derive(Parser)]
#[command(
    name = "stocklab",
    about = "StockLab — track holdings, prices and profit/loss from a CSV file",
    allow_negative_numbers = true
)]
struct Cli {
    /// Portfolio CSV file. Overrides `store_path` from the config file.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// TOML config file. Defaults to <config dir>/stocklab/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for simulated market moves (reproducible runs).
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default when no command is given).
    Menu,
    /// Add a holding.
    Add {
        #[arg(value_parser = input::parse_stock_no)]
        stock_no: StockNo,
        #[arg(value_parser = input::parse_shares)]
        shares: u32,
        /// Buy price per share.
        #[arg(value_parser = input::parse_price)]
        buy_price: Decimal,
        /// Current price per share.
        #[arg(value_parser = input::parse_price)]
        current_price: Decimal,
    },
    /// Set the current price of a holding.
    UpdatePrice {
        #[arg(value_parser = input::parse_stock_no)]
        stock_no: StockNo,
        #[arg(value_parser = input::parse_price)]
        price: Decimal,
    },
    /// Remove a holding.
    Remove {
        #[arg(value_parser = input::parse_stock_no)]
        stock_no: StockNo,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Print holdings ranked by profit/loss, then totals.
    Show {
        /// Emit JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Apply a random market move (±max_move) and save.
    Simulate {
        /// Only move this stock. Defaults to every stock.
        #[arg(long, value_parser = input::parse_stock_no)]
        id: Option<StockNo>,
    },
    /// Show value and investment charts.
    Chart,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init_logging(&config.log_level)?;

    let store = CsvStore::new(&config.store_path);
    let (mut tracker, warning) = Tracker::open(store, config.market.feed());
    if let Some(warning) = warning {
        eprintln!(
            "WARNING: {warning}. Continuing with {} stock(s) loaded.",
            tracker.portfolio().len()
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            drop(out);
            commands::run_interactive(&mut tracker)
        }
        Commands::Add {
            stock_no,
            shares,
            buy_price,
            current_price,
        } => commands::add(&mut tracker, &mut out, stock_no, shares, buy_price, current_price),
        Commands::UpdatePrice { stock_no, price } => {
            commands::update_price(&mut tracker, &mut out, stock_no, price)
        }
        Commands::Remove { stock_no, yes } => {
            let mut input = std::io::stdin().lock();
            commands::remove(&mut tracker, &mut input, &mut out, stock_no, yes)
        }
        Commands::Show { json } => commands::show(&tracker, &mut out, json),
        Commands::Simulate { id } => commands::simulate(&mut tracker, &mut out, id),
        Commands::Chart => {
            drop(out);
            stocklab_tui::run(tracker.chart_data())
        }
    }
}

/// Explicit `--config`, else the per-user config file if it exists, else
/// defaults. Command-line flags override file values.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let file = cli.config.clone().or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("stocklab").join("config.toml"))
            .filter(|path| path.exists())
    });

    let mut config = match file {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    if let Some(seed) = cli.seed {
        config.market.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}
