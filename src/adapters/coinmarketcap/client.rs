//! CoinMarketCap API Client
//!
//! HTTP client for the listings endpoint. One GET per call: no retries, no
//! backoff, no caching. A failed call fails the whole listing.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};

use crate::config::ProviderSection;
use crate::domain::Coin;
use crate::ports::{QuoteError, QuoteSource};
use super::types::{parse_listings, ErrorResponse};

/// Default listings endpoint
pub const LISTINGS_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// CoinMarketCap client configuration
#[derive(Debug, Clone)]
pub struct CoinMarketCapConfig {
    /// Listings endpoint URL
    pub listings_url: String,
    /// API key; requests go out without the header when absent
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CoinMarketCapConfig {
    fn default() -> Self {
        Self {
            listings_url: LISTINGS_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&ProviderSection> for CoinMarketCapConfig {
    fn from(section: &ProviderSection) -> Self {
        Self {
            listings_url: section.listings_url.clone(),
            api_key: section.get_api_key(),
            timeout: section.timeout(),
        }
    }
}

/// CoinMarketCap listings client
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    config: CoinMarketCapConfig,
    http: Client,
}

impl CoinMarketCapClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, QuoteError> {
        Self::with_config(CoinMarketCapConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: CoinMarketCapConfig) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("No CoinMarketCap API key configured - upstream will reject requests");
        }

        Ok(Self { config, http })
    }

    /// Create a new client with API key
    pub fn with_api_key(api_key: String) -> Result<Self, QuoteError> {
        Self::with_config(CoinMarketCapConfig {
            api_key: Some(api_key),
            ..CoinMarketCapConfig::default()
        })
    }

    /// Fetch the latest listings and flatten them into coins
    pub async fn fetch_listings(&self) -> Result<Vec<Coin>, QuoteError> {
        let mut req = self.http
            .get(&self.config.listings_url)
            .header(ACCEPT, "application/json");

        if let Some(ref api_key) = self.config.api_key {
            req = req.header(API_KEY_HEADER, api_key);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.status.error_message)
                .unwrap_or(body);
            tracing::debug!("CoinMarketCap rejected request ({}): {}", status, detail);
            return Err(QuoteError::UpstreamRejected { status: status.as_u16() });
        }

        let body = response.text().await?;
        let coins = parse_listings(&body)?;
        tracing::debug!("Fetched {} listings from CoinMarketCap", coins.len());
        Ok(coins)
    }

    /// Get the configured listings URL
    pub fn listings_url(&self) -> &str {
        &self.config.listings_url
    }
}

#[async_trait]
impl QuoteSource for CoinMarketCapClient {
    async fn list_coins(&self) -> Result<Vec<Coin>, QuoteError> {
        self.fetch_listings().await
    }
}
