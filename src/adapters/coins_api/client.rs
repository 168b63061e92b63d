//! Backend API Client
//!
//! What the dashboard polls: a `QuoteSource` backed by the backend's
//! `coins` query rather than by the provider directly.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;

use crate::adapters::server::CoinsResponse;
use crate::domain::Coin;
use crate::ports::{QuoteError, QuoteSource};

/// Client for `GET /api/coins`
#[derive(Debug, Clone)]
pub struct CoinsApiClient {
    endpoint: String,
    http: Client,
}

impl CoinsApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { endpoint: endpoint.into(), http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteSource for CoinsApiClient {
    async fn list_coins(&self) -> Result<Vec<Coin>, QuoteError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(QuoteError::UpstreamRejected { status: status.as_u16() });
        }

        let body: CoinsResponse = response.json().await?;
        body.into_result()
    }
}
