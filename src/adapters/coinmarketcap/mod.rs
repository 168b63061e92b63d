//! CoinMarketCap Adapter
//!
//! Implementation of `QuoteSource` backed by the CoinMarketCap listings API.
//! This is what the backend's `coins` query resolves against.

mod client;
mod types;

pub use client::{CoinMarketCapClient, CoinMarketCapConfig, API_KEY_HEADER, LISTINGS_URL};
pub use types::{parse_listings, Listing, ListingsResponse};
