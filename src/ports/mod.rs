//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, the dashboard and the backend both
//! depend on `QuoteSource` rather than on a concrete HTTP client:
//! - `quote_source`: the "list current coins" operation and its error kinds
//! - `mocks`: scripted doubles for integration tests

pub mod quote_source;
pub mod mocks;

pub use quote_source::{QuoteError, QuoteSource, FETCH_FAILED_MESSAGE};
pub use mocks::ScriptedQuoteSource;
