//! Interactive numbered menu over a tracker.
//!
//! Reads answers line by line from any `BufRead` and writes prompts to any
//! `Write`, so a whole session can be scripted in tests. End of input ends
//! the session.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;

use stocklab_core::input::{self, is_confirmation};
use stocklab_core::report::money;
use stocklab_core::{ChartData, InputError, Position, PriceFeed, PriceMove, Tracker, TrackerError};

const MENU: &str = "\nMAIN MENU\n\
1. Add Stock\n\
2. Update Price\n\
3. Remove Stock\n\
4. Show Portfolio\n\
5. Visualize Portfolio\n\
6. Simulate Market\n\
7. Exit";

/// Opens the chart viewer; swapped out in tests.
pub type Visualize<'a> = dyn FnMut(ChartData) -> Result<()> + 'a;

struct Session<'a, R, W, F> {
    tracker: &'a mut Tracker<F>,
    input: &'a mut R,
    out: &'a mut W,
}

pub fn run_menu<R: BufRead, W: Write, F: PriceFeed>(
    tracker: &mut Tracker<F>,
    input: &mut R,
    out: &mut W,
    visualize: &mut Visualize<'_>,
) -> Result<()> {
    let mut session = Session { tracker, input, out };

    loop {
        writeln!(session.out, "{MENU}")?;
        let Some(choice) = session.prompt("What's your choice? ")? else {
            break;
        };
        match choice.as_str() {
            "1" => session.add()?,
            "2" => session.update_price()?,
            "3" => session.remove()?,
            "4" => write!(session.out, "{}", session.tracker.report().render())?,
            "5" => {
                if let Err(e) = visualize(session.tracker.chart_data()) {
                    tracing::error!(error = %e, "chart viewer failed");
                    writeln!(session.out, "Could not open the charts: {e:#}")?;
                }
            }
            "6" => session.simulate()?,
            "7" | "q" | "quit" | "exit" => {
                writeln!(session.out, "See you later!")?;
                break;
            }
            _ => writeln!(session.out, "Hmm, I didn't catch that. Choose a valid option.")?,
        }
    }
    Ok(())
}

impl<R: BufRead, W: Write, F: PriceFeed> Session<'_, R, W, F> {
    /// One trimmed line, or `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses, or `None` at end of input.
    fn prompt_parsed<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.out, "Oops, {e}. Try again.")?,
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let Some(stock_no) = self.prompt_parsed("Enter the stock number: ", input::parse_stock_no)? else {
            return Ok(());
        };
        if self.tracker.portfolio().contains(stock_no) {
            writeln!(self.out, "Stock #{stock_no} is already in the portfolio.")?;
            return Ok(());
        }
        let Some(shares) = self.prompt_parsed("How many shares? ", input::parse_shares)? else {
            return Ok(());
        };
        let Some(buy_price) =
            self.prompt_parsed("What was the buy price per share? ", input::parse_price)?
        else {
            return Ok(());
        };
        let Some(current_price) =
            self.prompt_parsed("What's the current market price? ", input::parse_price)?
        else {
            return Ok(());
        };

        let position = match Position::new(stock_no, shares, buy_price, current_price) {
            Ok(position) => position,
            Err(e) => {
                writeln!(self.out, "Can't add that stock: {e}.")?;
                return Ok(());
            }
        };
        let outcome = self.tracker.add(position);
        self.report(outcome, |_| format!("Stock #{stock_no} added!"))
    }

    fn update_price(&mut self) -> Result<()> {
        let Some(stock_no) =
            self.prompt_parsed("Enter the stock number to update price: ", input::parse_stock_no)?
        else {
            return Ok(());
        };
        let Some(price) = self.prompt_parsed("What's the new market price? ", input::parse_price)? else {
            return Ok(());
        };
        let outcome = self.tracker.update_price(stock_no, price);
        self.report(outcome, |old: &Decimal| {
            format!(
                "Updated stock #{stock_no} price to {}. Old price was {}.",
                money(price),
                money(*old)
            )
        })
    }

    fn remove(&mut self) -> Result<()> {
        let Some(stock_no) =
            self.prompt_parsed("Enter the stock number you want to remove: ", input::parse_stock_no)?
        else {
            return Ok(());
        };
        if !self.tracker.portfolio().contains(stock_no) {
            writeln!(self.out, "Stock #{stock_no} isn't in the portfolio.")?;
            return Ok(());
        }
        let question = format!("Are you sure you want to remove stock #{stock_no}? (y/n): ");
        let confirmed = self.prompt(&question)?.is_some_and(|answer| is_confirmation(&answer));
        if !confirmed {
            writeln!(self.out, "Kept stock #{stock_no}.")?;
            return Ok(());
        }
        let outcome = self.tracker.remove(stock_no);
        self.report(outcome, |_| format!("Removed stock #{stock_no} from the portfolio."))
    }

    fn simulate(&mut self) -> Result<()> {
        let all_or_one = |raw: &str| {
            if raw.is_empty() {
                Ok(None)
            } else {
                input::parse_stock_no(raw).map(Some)
            }
        };
        let Some(target) =
            self.prompt_parsed("Stock number to simulate (blank for all): ", all_or_one)?
        else {
            return Ok(());
        };
        let outcome = match target {
            None => self.tracker.simulate_all(),
            Some(stock_no) => self.tracker.simulate(stock_no).map(|mv| vec![mv]),
        };
        self.report(outcome, |moves: &Vec<PriceMove>| {
            if moves.is_empty() {
                "Nothing to simulate: the portfolio is empty.".to_string()
            } else {
                moves.iter().map(format_move).collect::<Vec<_>>().join("\n")
            }
        })
    }

    /// Print the outcome of a tracker action. Portfolio failures are plain
    /// messages; a failed save is loud because the change only lives in memory.
    fn report<T>(
        &mut self,
        outcome: Result<T, TrackerError>,
        success: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        match outcome {
            Ok(value) => writeln!(self.out, "{}", success(&value))?,
            Err(TrackerError::Portfolio(e)) => writeln!(self.out, "Can't do that: {e}.")?,
            Err(TrackerError::Store(e)) => {
                tracing::error!(error = %e, "portfolio not saved");
                writeln!(self.out, "ERROR: {e}")?;
                writeln!(self.out, "ERROR: the change is NOT saved to disk.")?;
            }
        }
        Ok(())
    }
}

/// `Stock#1: $110.00 -> $115.50 (+5.00%)`
pub fn format_move(mv: &PriceMove) -> String {
    let pct = (mv.delta * Decimal::ONE_HUNDRED).round_dp(2);
    let sign = if pct >= Decimal::ZERO { "+" } else { "" };
    format!(
        "Stock#{}: {} -> {} ({sign}{pct:.2}%)",
        mv.stock_no,
        money(mv.old_price),
        money(mv.new_price)
    )
}
