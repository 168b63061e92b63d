//! Poller
//!
//! Periodic "list current coins" task owned by the dashboard's lifecycle.
//! Each request is awaited before the next tick, so at most one is in flight
//! and results arrive in the order they were issued.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::ClientSection;
use crate::domain::Coin;
use crate::ports::{QuoteError, QuoteSource};

/// Outcome of one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Loaded { coins: Vec<Coin>, fetched_at: DateTime<Utc> },
    Failed(QuoteError),
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between request starts
    pub interval: Duration,
    /// Stop after delivering the first failure
    pub stop_on_error: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            stop_on_error: true,
        }
    }
}

impl From<&ClientSection> for PollerConfig {
    fn from(section: &ClientSection) -> Self {
        Self {
            interval: section.poll_interval(),
            stop_on_error: section.stop_on_error,
        }
    }
}

pub struct Poller {
    source: Arc<dyn QuoteSource>,
    config: PollerConfig,
}

impl Poller {
    pub fn new(source: Arc<dyn QuoteSource>, config: PollerConfig) -> Self {
        Self { source, config }
    }

    /// Start polling; the first request goes out immediately.
    pub fn spawn(self, events: mpsc::Sender<PollEvent>) -> PollHandle {
        let task = tokio::spawn(async move { self.run(events).await });
        PollHandle { task }
    }

    async fn run(self, events: mpsc::Sender<PollEvent>) {
        let mut ticker = tokio::time::interval(self.config.interval);
        // A slow request swallows the ticks it overlaps instead of bursting.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("Polling every {:?}", self.config.interval);

        loop {
            ticker.tick().await;

            let event = match self.source.list_coins().await {
                Ok(coins) => {
                    tracing::debug!("Poll returned {} coins", coins.len());
                    PollEvent::Loaded { coins, fetched_at: Utc::now() }
                }
                Err(e) => {
                    tracing::warn!("Poll failed: {}", e);
                    PollEvent::Failed(e)
                }
            };
            let failed = matches!(event, PollEvent::Failed(_));

            if events.send(event).await.is_err() {
                tracing::debug!("View closed, stopping poller");
                break;
            }

            if failed && self.config.stop_on_error {
                tracing::info!("Polling stopped after error");
                break;
            }
        }
    }
}

/// Cancels the poll task when cancelled or dropped
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
