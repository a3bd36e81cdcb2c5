//! Tracker — a portfolio bound to its store and price feed.
//!
//! Every successful mutation is followed by a full save. A mutation that
//! fails leaves both the portfolio and the store untouched. A save that fails
//! after a successful mutation is reported as [`TrackerError::Store`]; the
//! in-memory change is kept so the next save can retry it.

use rust_decimal::Decimal;

use crate::chart::ChartData;
use crate::domain::{Portfolio, Position, PriceMove, StockNo};
use crate::error::{StoreError, TrackerError};
use crate::feed::PriceFeed;
use crate::report::Report;
use crate::store::CsvStore;

pub struct Tracker<F> {
    portfolio: Portfolio,
    store: CsvStore,
    feed: F,
}

impl<F: PriceFeed> Tracker<F> {
    /// Load the store and start a session.
    ///
    /// A store that could not be read fully is not fatal: the warning is
    /// returned alongside a tracker holding whatever was loaded.
    pub fn open(store: CsvStore, feed: F) -> (Self, Option<StoreError>) {
        let loaded = store.load();
        let tracker = Self {
            portfolio: loaded.portfolio,
            store,
            feed,
        };
        (tracker, loaded.warning)
    }

    /// Start a session over an in-memory portfolio without reading the store.
    pub fn with_portfolio(portfolio: Portfolio, store: CsvStore, feed: F) -> Self {
        Self {
            portfolio,
            store,
            feed,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    pub fn report(&self) -> Report {
        Report::new(&self.portfolio)
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData::from_portfolio(&self.portfolio)
    }

    pub fn add(&mut self, position: Position) -> Result<(), TrackerError> {
        self.portfolio.add(position)?;
        self.persist()
    }

    /// Returns the previous price.
    pub fn update_price(&mut self, id: StockNo, new_price: Decimal) -> Result<Decimal, TrackerError> {
        let old = self.portfolio.update_price(id, new_price)?;
        self.persist()?;
        Ok(old)
    }

    pub fn remove(&mut self, id: StockNo) -> Result<Position, TrackerError> {
        let removed = self.portfolio.remove(id)?;
        self.persist()?;
        Ok(removed)
    }

    /// Apply one move from the feed to a single stock.
    pub fn simulate(&mut self, id: StockNo) -> Result<PriceMove, TrackerError> {
        // Look up first so a missing stock does not consume a move.
        self.portfolio.find(id)?;
        let delta = self.feed.next_move(id);
        let mv = self.portfolio.apply_market_shock(id, delta)?;
        self.persist()?;
        Ok(mv)
    }

    /// Apply one move to every stock in canonical order, then save once.
    ///
    /// Moves are applied to a copy, so a rejected move leaves every price as
    /// it was.
    pub fn simulate_all(&mut self) -> Result<Vec<PriceMove>, TrackerError> {
        let mut next = self.portfolio.clone();
        let mut moves = Vec::with_capacity(next.len());
        for id in next.ids() {
            let delta = self.feed.next_move(id);
            moves.push(next.apply_market_shock(id, delta)?);
        }
        self.portfolio = next;
        if !moves.is_empty() {
            self.persist()?;
        }
        Ok(moves)
    }

    /// Write the current portfolio to the store.
    pub fn persist(&self) -> Result<(), TrackerError> {
        self.store.save(&self.portfolio)?;
        Ok(())
    }

    pub fn into_portfolio(self) -> Portfolio {
        self.portfolio
    }
}
