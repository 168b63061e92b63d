//! Quote Source Port
//!
//! The single read operation of the system: list current coins.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Coin;

/// The only message callers ever see for an upstream failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch coin data";

/// Why a coin listing could not be produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// Network failure, timeout or unreadable body
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream rejected request with status {status}")]
    UpstreamRejected { status: u16 },

    /// Body did not match the expected listing schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The backend reported an error; the message is carried verbatim
    #[error("{0}")]
    Remote(String),
}

impl QuoteError {
    /// Text safe to hand to a client.
    ///
    /// Upstream detail is collapsed into [`FETCH_FAILED_MESSAGE`]; a remote
    /// message already went through that collapse on the backend.
    pub fn public_message(&self) -> String {
        match self {
            QuoteError::Remote(message) => message.clone(),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            QuoteError::UpstreamRejected { status: status.as_u16() }
        } else if err.is_decode() {
            QuoteError::MalformedResponse(err.to_string())
        } else {
            QuoteError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::MalformedResponse(err.to_string())
    }
}

/// Anything that can produce the current coin list.
///
/// Implemented by the CoinMarketCap adapter on the backend and by the
/// backend API client on the dashboard side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch a fresh list, in provider order. All or nothing.
    async fn list_coins(&self) -> Result<Vec<Coin>, QuoteError>;
}
