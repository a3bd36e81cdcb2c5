//! One-shot subcommands. Each loads, applies a single action, saves and exits.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use stocklab_core::input::is_confirmation;
use stocklab_core::report::money;
use stocklab_core::{Position, PriceFeed, StockNo, Tracker};

use crate::menu::{self, format_move};

pub fn run_interactive<F: PriceFeed>(tracker: &mut Tracker<F>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run_menu(
        tracker,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stocklab_tui::run,
    )
}

pub fn add<F: PriceFeed>(
    tracker: &mut Tracker<F>,
    out: &mut impl Write,
    stock_no: StockNo,
    shares: u32,
    buy_price: Decimal,
    current_price: Decimal,
) -> Result<()> {
    let position = Position::new(stock_no, shares, buy_price, current_price)?;
    tracker
        .add(position)
        .with_context(|| format!("adding stock #{stock_no}"))?;
    writeln!(out, "Stock #{stock_no} added!")?;
    Ok(())
}

pub fn update_price<F: PriceFeed>(
    tracker: &mut Tracker<F>,
    out: &mut impl Write,
    stock_no: StockNo,
    price: Decimal,
) -> Result<()> {
    let old = tracker
        .update_price(stock_no, price)
        .with_context(|| format!("updating stock #{stock_no}"))?;
    writeln!(
        out,
        "Updated stock #{stock_no} price to {}. Old price was {}.",
        money(price),
        money(old)
    )?;
    Ok(())
}

/// Without `yes`, asks on `input` first; anything but y/yes keeps the stock.
pub fn remove<F: PriceFeed>(
    tracker: &mut Tracker<F>,
    input: &mut impl BufRead,
    out: &mut impl Write,
    stock_no: StockNo,
    yes: bool,
) -> Result<()> {
    if !tracker.portfolio().contains(stock_no) {
        anyhow::bail!("stock #{stock_no} is not in the portfolio");
    }
    if !yes {
        write!(out, "Are you sure you want to remove stock #{stock_no}? (y/n): ")?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !is_confirmation(&answer) {
            writeln!(out, "Kept stock #{stock_no}.")?;
            return Ok(());
        }
    }
    tracker
        .remove(stock_no)
        .with_context(|| format!("removing stock #{stock_no}"))?;
    writeln!(out, "Removed stock #{stock_no} from the portfolio.")?;
    Ok(())
}

pub fn show<F: PriceFeed>(tracker: &Tracker<F>, out: &mut impl Write, json: bool) -> Result<()> {
    let report = tracker.report();
    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", report.render())?;
    }
    Ok(())
}

pub fn simulate<F: PriceFeed>(
    tracker: &mut Tracker<F>,
    out: &mut impl Write,
    id: Option<StockNo>,
) -> Result<()> {
    let moves = match id {
        Some(stock_no) => vec![tracker
            .simulate(stock_no)
            .with_context(|| format!("simulating stock #{stock_no}"))?],
        None => tracker.simulate_all().context("simulating the market")?,
    };
    if moves.is_empty() {
        writeln!(out, "Nothing to simulate: the portfolio is empty.")?;
    }
    for mv in &moves {
        writeln!(out, "{}", format_move(mv))?;
    }
    Ok(())
}
