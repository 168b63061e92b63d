use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single listing as served by the `coins` query.
///
/// `id` is whatever the upstream provider uses as a stable key. It is kept as
/// text so integer and string identifiers travel the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoinError {
    #[error("Coin id is empty")]
    EmptyId,
    #[error("Coin name is empty (id {0})")]
    EmptyName(String),
    #[error("Coin symbol is empty (id {0})")]
    EmptySymbol(String),
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: String, price: f64 },
}

impl Coin {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price: f64,
    ) -> Result<Self, CoinError> {
        let id = id.into();
        let name = name.into();
        let symbol = symbol.into();

        if id.is_empty() {
            return Err(CoinError::EmptyId);
        }
        if name.is_empty() {
            return Err(CoinError::EmptyName(id));
        }
        if symbol.is_empty() {
            return Err(CoinError::EmptySymbol(id));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(CoinError::InvalidPrice { id, price });
        }

        Ok(Self {
            id,
            name,
            symbol,
            price,
        })
    }

    /// `Bitcoin (BTC)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.id, self.display_name(), self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_coin() {
        let coin = Coin::new("1", "Bitcoin", "BTC", 65432.1).unwrap();
        assert_eq!(coin.id, "1");
        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.symbol, "BTC");
        assert_eq!(coin.price, 65432.1);
    }

    #[test]
    fn test_zero_price_is_valid() {
        assert!(Coin::new("42", "Dust", "DST", 0.0).is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Coin::new("1", "", "BTC", 1.0);
        assert_eq!(result, Err(CoinError::EmptyName("1".to_string())));
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let result = Coin::new("1", "Bitcoin", "", 1.0);
        assert_eq!(result, Err(CoinError::EmptySymbol("1".to_string())));
    }

    #[test]
    fn test_rejects_empty_id() {
        assert_eq!(Coin::new("", "Bitcoin", "BTC", 1.0), Err(CoinError::EmptyId));
    }

    #[test]
    fn test_rejects_non_finite_price() {
        assert!(Coin::new("1", "Bitcoin", "BTC", f64::NAN).is_err());
        assert!(Coin::new("1", "Bitcoin", "BTC", f64::INFINITY).is_err());
        assert!(Coin::new("1", "Bitcoin", "BTC", -1.0).is_err());
    }

    #[test]
    fn test_display_name() {
        let coin = Coin::new("1027", "Ethereum", "ETH", 3000.0).unwrap();
        assert_eq!(coin.display_name(), "Ethereum (ETH)");
    }

    #[test]
    fn test_serializes_flat_record() {
        let coin = Coin::new("1", "Bitcoin", "BTC", 65432.1).unwrap();
        let json = serde_json::to_value(&coin).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "name": "Bitcoin", "symbol": "BTC", "price": 65432.1})
        );
    }
}
