use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stock number: the user-chosen identifier of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockNo(pub i64);

impl StockNo {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl From<i64> for StockNo {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for StockNo {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for StockNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<StockNo>().unwrap(), StockNo(42));
    }

    #[test]
    fn any_integer_is_a_stock_number() {
        assert_eq!("-3".parse::<StockNo>().unwrap(), StockNo(-3));
        assert_eq!("0".parse::<StockNo>().unwrap(), StockNo(0));
        assert!("1.5".parse::<StockNo>().is_err());
    }

    #[test]
    fn displays_bare_number() {
        assert_eq!(StockNo(7).to_string(), "7");
    }
}
