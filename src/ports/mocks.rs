//! Scripted test doubles for the ports.
//!
//! `mockall` covers unit tests inside the crate; these live outside
//! `cfg(test)` so integration tests under `tests/` can drive the
//! dashboard without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use crate::domain::Coin;
use super::quote_source::{QuoteError, QuoteSource};

/// Quote source that replays a fixed script of responses
///
/// Once the script runs dry the last response repeats.
#[derive(Debug, Clone, Default)]
pub struct ScriptedQuoteSource {
    script: Arc<Mutex<VecDeque<Result<Vec<Coin>, QuoteError>>>>,
    last: Arc<Mutex<Option<Result<Vec<Coin>, QuoteError>>>>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    latency: Duration,
}

impl ScriptedQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a successful response
    pub fn then_ok(self, coins: Vec<Coin>) -> Self {
        self.script.lock().unwrap().push_back(Ok(coins));
        self
    }

    /// Builder method to queue a failure
    pub fn then_err(self, err: QuoteError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    /// Builder method to make every call take `latency` to resolve
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `list_coins` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were ever outstanding at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for ScriptedQuoteSource {
    async fn list_coins(&self) -> Result<Vec<Coin>, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        let response = match next {
            Some(response) => {
                *self.last.lock().unwrap() = Some(response.clone());
                response
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(Vec::new())),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}
