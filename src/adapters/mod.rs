//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the outer
//! surfaces:
//! - CoinMarketCap: upstream listings client (backend side)
//! - Coins API: client for the backend's `coins` query (dashboard side)
//! - Server: actix-web backend exposing the `coins` query
//! - CLI: Command-line interface handlers

pub mod coinmarketcap;
pub mod coins_api;
pub mod server;
pub mod cli;

#[cfg(test)]
mod test_http;

pub use coinmarketcap::{CoinMarketCapClient, CoinMarketCapConfig};
pub use coins_api::CoinsApiClient;
pub use cli::CliApp;
