//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! defaults, so a partial file (or none at all) is a valid configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the CoinMarketCap API key
pub const API_KEY_ENV: &str = "CRYPTO_API";

const DEFAULT_LISTINGS_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub provider: ProviderSection,
    pub client: ClientSection,
    pub logging: LoggingSection,
}

/// Backend HTTP server section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind
    pub host: String,
    /// Port for the `coins` query
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

/// Upstream market-data provider section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// Listings endpoint
    pub listings_url: String,
    /// API key; empty means "use CRYPTO_API"
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl ProviderSection {
    /// Get API key with environment variable fallback
    ///
    /// A missing key is not an error here: the provider will reject the
    /// request and the adapter reports its usual fetch failure.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Dashboard section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    /// Backend `coins` endpoint
    pub endpoint: String,
    /// Poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Stop polling after the first failed poll
    pub stop_on_error: bool,
    /// Emit ANSI colours
    pub ansi: bool,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:4000/api/coins".to_string(),
            poll_interval_ms: 2000,
            stop_on_error: true,
            ansi: true,
        }
    }
}

impl ClientSection {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".to_string(),
            ));
        }

        validate_url("provider.listings_url", &self.provider.listings_url)?;

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "provider.timeout_secs must be > 0".to_string(),
            ));
        }

        validate_url("client.endpoint", &self.client.endpoint)?;

        if self.client.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "client.poll_interval_ms must be > 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got {}",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got {:?}",
            field, url
        )))
    }
}
