//! Portfolio — ordered, identifier-unique collection of positions.

use rust_decimal::Decimal;
use serde::Serialize;

use super::position::{check_price, Position, PRICE_SCALE};
use super::StockNo;
use crate::error::PortfolioError;

/// Aggregate valuation across all positions.
///
/// `profit_loss == current_value - investment`, which also equals the sum of
/// every position's own profit/loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub investment: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
}

/// Outcome of a simulated market move on one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceMove {
    pub stock_no: StockNo,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub delta: Decimal,
}

/// Holdings in insertion order.
///
/// Insertion order is canonical and is never rearranged; ranking produces a
/// separate view. Every operation either succeeds or leaves the collection
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in canonical (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    pub fn ids(&self) -> Vec<StockNo> {
        self.positions.iter().map(Position::stock_no).collect()
    }

    pub fn contains(&self, id: StockNo) -> bool {
        self.index_of(id).is_some()
    }

    /// Append a position. Duplicate stock numbers are rejected, not merged.
    pub fn add(&mut self, position: Position) -> Result<(), PortfolioError> {
        let id = position.stock_no();
        if self.contains(id) {
            return Err(PortfolioError::DuplicateIdentifier(id));
        }
        tracing::info!(
            stock_no = %id,
            shares = position.shares(),
            buy_price = %position.buy_price(),
            "added stock #{id} to the portfolio"
        );
        self.positions.push(position);
        Ok(())
    }

    pub fn find(&self, id: StockNo) -> Result<&Position, PortfolioError> {
        self.positions
            .iter()
            .find(|p| p.stock_no() == id)
            .ok_or(PortfolioError::NotFound(id))
    }

    /// Set a new current price, returning the previous one.
    pub fn update_price(&mut self, id: StockNo, new_price: Decimal) -> Result<Decimal, PortfolioError> {
        check_price(new_price)?;
        let position = self.find_mut(id)?;
        let old_price = position.set_current_price(new_price)?;
        tracing::info!(
            stock_no = %id,
            %old_price,
            %new_price,
            "updated stock #{id} price to {new_price:.2} (was {old_price})"
        );
        Ok(old_price)
    }

    /// Delete a position unconditionally. Confirmation belongs to the caller.
    pub fn remove(&mut self, id: StockNo) -> Result<Position, PortfolioError> {
        let idx = self.index_of(id).ok_or(PortfolioError::NotFound(id))?;
        let removed = self.positions.remove(idx);
        tracing::info!(stock_no = %id, "removed stock #{id} from the portfolio");
        Ok(removed)
    }

    /// Positions ordered by descending profit/loss.
    ///
    /// The sort is stable: equal profit/loss keeps insertion order.
    pub fn ranked_view(&self) -> Vec<&Position> {
        let mut ranked: Vec<&Position> = self.positions.iter().collect();
        ranked.sort_by(|a, b| b.profit_loss().cmp(&a.profit_loss()));
        ranked
    }

    pub fn totals(&self) -> Totals {
        let (investment, current_value) = self
            .positions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inv, val), p| {
                (inv + p.investment(), val + p.current_value())
            });
        Totals {
            investment,
            current_value,
            profit_loss: current_value - investment,
        }
    }

    /// Multiply the current price by `1 + delta`.
    ///
    /// `delta` is a fraction (0.03 is +3%). The new price is rounded to
    /// [`PRICE_SCALE`] places; a delta below -1 would make it negative and is
    /// rejected, as is a move that pushes the holding past
    /// [`MAX_POSITION_VALUE`](super::position::MAX_POSITION_VALUE).
    pub fn apply_market_shock(&mut self, id: StockNo, delta: Decimal) -> Result<PriceMove, PortfolioError> {
        let position = self.find_mut(id)?;
        let old_price = position.current_price();
        let new_price = Decimal::ONE
            .checked_add(delta)
            .and_then(|factor| old_price.checked_mul(factor))
            .ok_or(PortfolioError::ValueTooLarge(id))?
            .round_dp(PRICE_SCALE);
        position.set_current_price(new_price)?;
        tracing::debug!(stock_no = %id, %old_price, %new_price, %delta, "market move");
        Ok(PriceMove {
            stock_no: id,
            old_price,
            new_price,
            delta,
        })
    }

    fn index_of(&self, id: StockNo) -> Option<usize> {
        self.positions.iter().position(|p| p.stock_no() == id)
    }

    fn find_mut(&mut self, id: StockNo) -> Result<&mut Position, PortfolioError> {
        self.positions
            .iter_mut()
            .find(|p| p.stock_no() == id)
            .ok_or(PortfolioError::NotFound(id))
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}
