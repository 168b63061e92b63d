//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, ServerSection, ProviderSection, ClientSection, LoggingSection,
    load_config, API_KEY_ENV,
};
