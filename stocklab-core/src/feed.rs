//! Price feeds — where simulated market moves come from.
//!
//! A feed hands out fractional price moves (0.03 is +3%). The portfolio
//! applies them through [`Portfolio::apply_market_shock`]; the feed never
//! touches prices itself, so tests can swap in a scripted feed.
//!
//! [`Portfolio::apply_market_shock`]: crate::domain::Portfolio::apply_market_shock

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::StockNo;

/// Default bound on a simulated move: ±5%.
pub const DEFAULT_MAX_MOVE: f64 = 0.05;

/// Decimal places kept on a generated move.
const MOVE_SCALE: u32 = 6;

/// Source of fractional price moves.
pub trait PriceFeed {
    fn next_move(&mut self, stock_no: StockNo) -> Decimal;
}

impl<F: PriceFeed + ?Sized> PriceFeed for Box<F> {
    fn next_move(&mut self, stock_no: StockNo) -> Decimal {
        (**self).next_move(stock_no)
    }
}

/// Uniform random moves in `[-max_move, +max_move]`.
#[derive(Debug, Clone)]
pub struct RandomFeed {
    rng: StdRng,
    max_move: f64,
}

impl RandomFeed {
    /// Deterministic feed: the same seed yields the same sequence of moves.
    pub fn seeded(seed: u64, max_move: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_move: max_move.abs(),
        }
    }

    pub fn from_entropy(max_move: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            max_move: max_move.abs(),
        }
    }

    pub fn max_move(&self) -> f64 {
        self.max_move
    }
}

impl PriceFeed for RandomFeed {
    fn next_move(&mut self, _stock_no: StockNo) -> Decimal {
        if self.max_move == 0.0 {
            return Decimal::ZERO;
        }
        let fraction = self.rng.gen_range(-self.max_move..=self.max_move);
        Decimal::from_f64(fraction)
            .map(|d| d.round_dp(MOVE_SCALE))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Replays a fixed list of moves, then stays flat.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    moves: VecDeque<Decimal>,
}

impl ScriptedFeed {
    pub fn new(moves: impl IntoIterator<Item = Decimal>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl PriceFeed for ScriptedFeed {
    fn next_move(&mut self, _stock_no: StockNo) -> Decimal {
        self.moves.pop_front().unwrap_or(Decimal::ZERO)
    }
}
