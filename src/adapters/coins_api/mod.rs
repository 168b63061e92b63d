//! Backend API Adapter
//!
//! Dashboard-side client for the backend's `coins` query.

mod client;

pub use client::CoinsApiClient;
