//! CoinMarketCap Listing Types
//!
//! Response structures for `/v1/cryptocurrency/listings/latest`. Only the
//! fields the `coins` query needs are modelled; everything else is ignored.

use serde::Deserialize;

use crate::domain::Coin;
use crate::ports::QuoteError;

/// Top-level listings response
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsResponse {
    /// Request status block (present on success and on most errors)
    #[serde(default)]
    pub status: Option<ApiStatus>,
    /// Listings in provider order
    pub data: Vec<Listing>,
}

/// Status block CoinMarketCap attaches to every response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub credit_count: Option<u32>,
}

/// Body of a rejected request, used only for logging
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub status: ApiStatus,
}

/// One listing entry
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub symbol: String,
    pub quote: Quote,
}

/// Listing identifier, an integer on the wire but opaque to us
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(i64),
    Text(String),
}

impl ListingId {
    pub fn into_string(self) -> String {
        match self {
            ListingId::Number(n) => n.to_string(),
            ListingId::Text(s) => s,
        }
    }
}

/// Quotes keyed by convert currency; only USD is requested
#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdQuote {
    pub price: PriceValue,
}

/// Price as sent by the provider: normally a number, occasionally a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn to_f64(&self) -> Result<f64, QuoteError> {
        match self {
            PriceValue::Number(n) => Ok(*n),
            PriceValue::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                QuoteError::MalformedResponse(format!("price {:?} is not a number: {}", s, e))
            }),
        }
    }
}

impl Listing {
    /// Flatten into the `Coin` record
    pub fn into_coin(self) -> Result<Coin, QuoteError> {
        let price = self.quote.usd.price.to_f64()?;
        Coin::new(self.id.into_string(), self.name, self.symbol, price)
            .map_err(|e| QuoteError::MalformedResponse(e.to_string()))
    }
}

/// Map a listings body into coins, all or nothing, keeping provider order.
pub fn parse_listings(body: &str) -> Result<Vec<Coin>, QuoteError> {
    let response: ListingsResponse = serde_json::from_str(body)?;
    response.data.into_iter().map(Listing::into_coin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bitcoin_scenario() {
        let body = r#"{"data":[{"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":65432.1}}}]}"#;

        let coins = parse_listings(body).unwrap();

        assert_eq!(coins, vec![Coin::new("1", "Bitcoin", "BTC", 65432.1).unwrap()]);
    }

    #[test]
    fn test_string_id_and_string_price() {
        let body = r#"{"data":[{"id":"abc","name":"Tether","symbol":"USDT","quote":{"USD":{"price":"0.99987"}}}]}"#;

        let coins = parse_listings(body).unwrap();

        assert_eq!(coins[0].id, "abc");
        assert_relative_eq!(coins[0].price, 0.99987);
    }

    #[test]
    fn test_integer_price() {
        let body = r#"{"data":[{"id":3,"name":"Stable","symbol":"STB","quote":{"USD":{"price":1}}}]}"#;
        assert_relative_eq!(parse_listings(body).unwrap()[0].price, 1.0);
    }

    #[test]
    fn test_keeps_provider_order_and_duplicates() {
        let body = r#"{"data":[
            {"id":1027,"name":"Ethereum","symbol":"ETH","quote":{"USD":{"price":3000.5}}},
            {"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":65000}}},
            {"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":65000}}}
        ]}"#;

        let ids: Vec<String> = parse_listings(body).unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1027", "1", "1"]);
    }

    #[test]
    fn test_empty_data_is_empty_list() {
        assert_eq!(parse_listings(r#"{"data":[]}"#).unwrap(), Vec::<Coin>::new());
    }

    #[test]
    fn test_missing_usd_quote_fails_whole_list() {
        let body = r#"{"data":[
            {"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":65000}}},
            {"id":2,"name":"Litecoin","symbol":"LTC","quote":{"EUR":{"price":80}}}
        ]}"#;

        assert!(matches!(parse_listings(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_null_price_is_malformed() {
        let body = r#"{"data":[{"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":null}}}]}"#;
        assert!(matches!(parse_listings(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_unparseable_price_string_is_malformed() {
        let body = r#"{"data":[{"id":1,"name":"Bitcoin","symbol":"BTC","quote":{"USD":{"price":"lots"}}}]}"#;
        assert!(matches!(parse_listings(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let body = r#"{"data":[{"id":1,"name":"","symbol":"BTC","quote":{"USD":{"price":1}}}]}"#;
        assert!(matches!(parse_listings(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_listings("<html>502 Bad Gateway</html>"),
            Err(QuoteError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_error_body_parses_status() {
        let body = r#"{"status":{"error_code":1002,"error_message":"API key missing.","credit_count":0}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status.error_code, 1002);
        assert_eq!(parsed.status.error_message.as_deref(), Some("API key missing."));
    }
}
