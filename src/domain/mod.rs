//! Domain Layer - Core types and pure logic for the price dashboard
//!
//! Nothing in here touches the network or the terminal:
//! - `coin`: the flat `Coin` record served by the `coins` query
//! - `filter`: case-insensitive name search
//! - `price_format`: USD formatting for the Price column

pub mod coin;
pub mod filter;
pub mod price_format;

pub use coin::{Coin, CoinError};
pub use filter::filter_by_name;
pub use price_format::{format_grouped, format_usd};
