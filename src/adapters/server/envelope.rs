//! Response envelope for the `coins` query.
//!
//! GraphQL-style: `data` always present (null on failure), `errors` only
//! when something went wrong.

use serde::{Deserialize, Serialize};

use crate::domain::Coin;
use crate::ports::QuoteError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsResponse {
    pub data: Option<CoinsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<QueryErrorBody>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsData {
    pub coins: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryErrorBody {
    pub message: String,
}

impl CoinsResponse {
    pub fn ok(coins: Vec<Coin>) -> Self {
        Self {
            data: Some(CoinsData { coins }),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(vec![QueryErrorBody { message: message.into() }]),
        }
    }

    /// Unwrap on the consuming side; the first reported error wins.
    pub fn into_result(self) -> Result<Vec<Coin>, QuoteError> {
        if let Some(first) = self.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(QuoteError::Remote(first.message));
        }
        self.data
            .map(|data| data.coins)
            .ok_or_else(|| QuoteError::MalformedResponse("response has neither data nor errors".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_shape() {
        let coin = Coin::new("1", "Bitcoin", "BTC", 65432.1).unwrap();
        let value = serde_json::to_value(CoinsResponse::ok(vec![coin])).unwrap();
        assert_eq!(
            value,
            json!({"data": {"coins": [{"id": "1", "name": "Bitcoin", "symbol": "BTC", "price": 65432.1}]}})
        );
    }

    #[test]
    fn test_error_shape() {
        let value = serde_json::to_value(CoinsResponse::error("Failed to fetch coin data")).unwrap();
        assert_eq!(
            value,
            json!({"data": null, "errors": [{"message": "Failed to fetch coin data"}]})
        );
    }

    #[test]
    fn test_into_result_prefers_errors() {
        let response: CoinsResponse = serde_json::from_value(json!({
            "data": {"coins": []},
            "errors": [{"message": "first"}, {"message": "second"}]
        }))
        .unwrap();
        assert_eq!(response.into_result(), Err(QuoteError::Remote("first".into())));
    }

    #[test]
    fn test_into_result_empty_envelope_is_malformed() {
        let response: CoinsResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(matches!(response.into_result(), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_errors_array_falls_back_to_data() {
        let response: CoinsResponse =
            serde_json::from_value(json!({"data": {"coins": []}, "errors": []})).unwrap();
        assert_eq!(response.into_result(), Ok(vec![]));
    }
}
