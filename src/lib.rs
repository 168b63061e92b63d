//! Coin Ticker - Live Cryptocurrency Price Table Library
//!
//! A backend that proxies the CoinMarketCap listings endpoint behind a single
//! `coins` query, and a terminal dashboard that polls it.
//!
//! # Modules
//!
//! - `domain`: Core types (Coin, name filter, USD price formatting)
//! - `ports`: Trait abstractions (QuoteSource, QuoteError)
//! - `adapters`: External implementations (CoinMarketCap, backend server, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Live table view, poller and dashboard loop

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
