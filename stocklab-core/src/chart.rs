//! Chart data shaping — the series the chart viewer draws.
//!
//! Two views, both in canonical (insertion) order:
//! 1. Current value per stock, flagged gain or loss for coloring
//! 2. Investment vs current value per stock, drawn as two lines

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Portfolio, StockNo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueBar {
    pub stock_no: StockNo,
    pub value: Decimal,
    /// Profit/loss is zero or positive.
    pub gain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonPoint {
    pub stock_no: StockNo,
    pub investment: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub value_bars: Vec<ValueBar>,
    pub comparison: Vec<ComparisonPoint>,
}

impl ChartData {
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let value_bars = portfolio
            .iter()
            .map(|p| ValueBar {
                stock_no: p.stock_no(),
                value: p.current_value(),
                gain: p.is_gain(),
            })
            .collect();
        let comparison = portfolio
            .iter()
            .map(|p| ComparisonPoint {
                stock_no: p.stock_no(),
                investment: p.investment(),
                value: p.current_value(),
            })
            .collect();
        Self {
            value_bars,
            comparison,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value_bars.is_empty()
    }

    /// Largest value across both views, for axis bounds.
    pub fn max_value(&self) -> Decimal {
        self.comparison
            .iter()
            .flat_map(|c| [c.investment, c.value])
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;
    use rust_decimal_macros::dec;

    #[test]
    fn shapes_parallel_series_in_canonical_order() {
        let mut portfolio = Portfolio::new();
        portfolio
            .add(Position::new(StockNo(2), 5, dec!(200), dec!(190)).unwrap())
            .unwrap();
        portfolio
            .add(Position::new(StockNo(1), 10, dec!(100), dec!(110)).unwrap())
            .unwrap();

        let data = ChartData::from_portfolio(&portfolio);
        assert_eq!(
            data.value_bars,
            vec![
                ValueBar { stock_no: StockNo(2), value: dec!(950), gain: false },
                ValueBar { stock_no: StockNo(1), value: dec!(1100), gain: true },
            ]
        );
        assert_eq!(data.comparison[0].investment, dec!(1000));
        assert_eq!(data.comparison[1].investment, dec!(1000));
        assert_eq!(data.max_value(), dec!(1100));
    }

    #[test]
    fn empty_portfolio_has_no_series() {
        let data = ChartData::from_portfolio(&Portfolio::new());
        assert!(data.is_empty());
        assert_eq!(data.max_value(), Decimal::ZERO);
    }
}
