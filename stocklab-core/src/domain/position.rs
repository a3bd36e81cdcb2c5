use rust_decimal::Decimal;
use serde::Serialize;

use super::StockNo;
use crate::error::PortfolioError;

/// Decimal places kept on prices produced by market moves.
pub const PRICE_SCALE: u32 = 4;

/// Largest investment or current value a single holding may have (10^18).
///
/// Even `u32::MAX` holdings at this value sum to well below `Decimal::MAX`,
/// so valuation and totals never overflow.
pub const MAX_POSITION_VALUE: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// One stock holding.
///
/// Share count is positive, both prices are non-negative and both values
/// stay within [`MAX_POSITION_VALUE`]; `new` enforces this and the portfolio
/// only replaces the current price through validated paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    stock_no: StockNo,
    shares: u32,
    buy_price: Decimal,
    current_price: Decimal,
}

impl Position {
    pub fn new(
        stock_no: StockNo,
        shares: u32,
        buy_price: Decimal,
        current_price: Decimal,
    ) -> Result<Self, PortfolioError> {
        if shares == 0 {
            return Err(PortfolioError::InvalidShareCount(shares));
        }
        check_price(buy_price)?;
        check_price(current_price)?;
        check_value(stock_no, shares, buy_price)?;
        check_value(stock_no, shares, current_price)?;
        Ok(Self {
            stock_no,
            shares,
            buy_price,
            current_price,
        })
    }

    pub fn stock_no(&self) -> StockNo {
        self.stock_no
    }

    pub fn shares(&self) -> u32 {
        self.shares
    }

    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    pub fn current_price(&self) -> Decimal {
        self.current_price
    }

    /// Worth of the holding at the current price.
    pub fn current_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.current_price
    }

    /// Amount paid for the holding.
    pub fn investment(&self) -> Decimal {
        Decimal::from(self.shares) * self.buy_price
    }

    /// Signed gain; zero is break-even.
    pub fn profit_loss(&self) -> Decimal {
        self.current_value() - self.investment()
    }

    /// Break-even counts as a gain.
    pub fn is_gain(&self) -> bool {
        self.profit_loss() >= Decimal::ZERO
    }

    /// Store row: stock no, shares, buy price, current price. Column order is
    /// the on-disk contract.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.stock_no.to_string(),
            self.shares.to_string(),
            self.buy_price.to_string(),
            self.current_price.to_string(),
        ]
    }

    /// Replace the current price, returning the previous one.
    pub(crate) fn set_current_price(&mut self, price: Decimal) -> Result<Decimal, PortfolioError> {
        check_price(price)?;
        check_value(self.stock_no, self.shares, price)?;
        Ok(std::mem::replace(&mut self.current_price, price))
    }
}

fn check_value(stock_no: StockNo, shares: u32, price: Decimal) -> Result<(), PortfolioError> {
    match Decimal::from(shares).checked_mul(price) {
        Some(value) if value <= MAX_POSITION_VALUE => Ok(()),
        _ => Err(PortfolioError::ValueTooLarge(stock_no)),
    }
}

pub(crate) fn check_price(price: Decimal) -> Result<(), PortfolioError> {
    if price < Decimal::ZERO {
        return Err(PortfolioError::InvalidPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pos(shares: u32, buy: Decimal, current: Decimal) -> Position {
        Position::new(StockNo(1), shares, buy, current).unwrap()
    }

    #[test]
    fn valuation_of_a_gain() {
        let p = pos(10, dec!(100), dec!(110));
        assert_eq!(p.current_value(), dec!(1100));
        assert_eq!(p.investment(), dec!(1000));
        assert_eq!(p.profit_loss(), dec!(100));
        assert!(p.is_gain());
    }

    #[test]
    fn valuation_of_a_loss() {
        let p = pos(5, dec!(200), dec!(190));
        assert_eq!(p.current_value(), dec!(950));
        assert_eq!(p.profit_loss(), dec!(-50));
        assert!(!p.is_gain());
    }

    #[test]
    fn break_even_is_a_gain() {
        let p = pos(3, dec!(12.5), dec!(12.50));
        assert_eq!(p.profit_loss(), Decimal::ZERO);
        assert!(p.is_gain());
    }

    #[test]
    fn rejects_zero_shares() {
        let err = Position::new(StockNo(1), 0, dec!(1), dec!(1)).unwrap_err();
        assert_eq!(err, PortfolioError::InvalidShareCount(0));
    }

    #[test]
    fn rejects_negative_prices() {
        assert_eq!(
            Position::new(StockNo(1), 1, dec!(-1), dec!(1)).unwrap_err(),
            PortfolioError::InvalidPrice(dec!(-1))
        );
        assert_eq!(
            Position::new(StockNo(1), 1, dec!(1), dec!(-0.01)).unwrap_err(),
            PortfolioError::InvalidPrice(dec!(-0.01))
        );
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(Position::new(StockNo(1), 1, Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn max_value_is_ten_to_the_eighteenth() {
        assert_eq!(MAX_POSITION_VALUE, Decimal::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn rejects_values_beyond_the_limit() {
        let huge = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        assert_eq!(
            Position::new(StockNo(1), 1_000_000_000, huge, huge).unwrap_err(),
            PortfolioError::ValueTooLarge(StockNo(1))
        );
        assert_eq!(
            Position::new(StockNo(2), u32::MAX, dec!(1), Decimal::MAX).unwrap_err(),
            PortfolioError::ValueTooLarge(StockNo(2))
        );
        // Exactly at the limit is fine.
        let p = Position::new(StockNo(3), 1, MAX_POSITION_VALUE, MAX_POSITION_VALUE).unwrap();
        assert_eq!(p.current_value(), MAX_POSITION_VALUE);
    }

    #[test]
    fn largest_share_count_fits_within_the_limit() {
        let p = Position::new(StockNo(1), u32::MAX, dec!(0), dec!(200000000)).unwrap();
        assert_eq!(p.profit_loss(), p.current_value());
        assert!(p.current_value() <= MAX_POSITION_VALUE);
    }

    #[test]
    fn set_price_rejects_overflowing_value() {
        let mut p = pos(1_000_000_000, dec!(1), dec!(1));
        assert_eq!(
            p.set_current_price(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0)),
            Err(PortfolioError::ValueTooLarge(StockNo(1)))
        );
        assert_eq!(p.current_price(), dec!(1));
    }

    #[test]
    fn record_field_order() {
        let p = Position::new(StockNo(4), 12, dec!(10.25), dec!(11)).unwrap();
        assert_eq!(p.to_record(), ["4", "12", "10.25", "11"]);
    }

    #[test]
    fn set_price_returns_previous() {
        let mut p = pos(1, dec!(5), dec!(6));
        assert_eq!(p.set_current_price(dec!(7)).unwrap(), dec!(6));
        assert_eq!(p.current_price(), dec!(7));
        assert!(p.set_current_price(dec!(-7)).is_err());
        assert_eq!(p.current_price(), dec!(7));
    }
}
