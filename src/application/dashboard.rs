//! Dashboard
//!
//! Owns the Live Table View and the poller for the lifetime of one terminal
//! session. Poll results and console commands are serialized into this one
//! task, so the view is never touched concurrently.

use std::sync::Arc;
use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::ports::QuoteSource;
use super::input::ViewCommand;
use super::live_table::LiveTableView;
use super::poller::{Poller, PollerConfig};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const FOOTER: &str = "type to search | :clear | :dark | :q";

pub struct Dashboard {
    view: LiveTableView,
    poller: Poller,
    clear_screen: bool,
}

impl Dashboard {
    pub fn new(source: Arc<dyn QuoteSource>, config: PollerConfig, view: LiveTableView) -> Self {
        Self {
            view,
            poller: Poller::new(source, config),
            clear_screen: false,
        }
    }

    /// Clear the terminal before each redraw instead of appending
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Run until `:q`, or until both input and polling have ended.
    ///
    /// Returns the final view state. The poll task is cancelled on the way out.
    pub async fn run<W>(mut self, mut commands: mpsc::Receiver<ViewCommand>, out: &mut W) -> Result<LiveTableView>
    where
        W: AsyncWrite + Unpin,
    {
        let (tx, mut events) = mpsc::channel(8);
        let handle = self.poller.spawn(tx);

        let mut polling = true;
        let mut input_open = true;

        redraw(&self.view, self.clear_screen, out).await?;

        loop {
            tokio::select! {
                event = events.recv(), if polling => match event {
                    Some(event) => self.view.apply(event),
                    None => {
                        tracing::debug!("Poller finished");
                        polling = false;
                        continue;
                    }
                },
                command = commands.recv(), if input_open => match command {
                    Some(ViewCommand::Quit) => break,
                    Some(command) => self.view.handle(&command),
                    None => {
                        tracing::debug!("Input closed");
                        input_open = false;
                        continue;
                    }
                },
                else => break,
            }

            redraw(&self.view, self.clear_screen, out).await?;
        }

        handle.cancel();
        Ok(self.view)
    }
}

async fn redraw<W>(view: &LiveTableView, clear_screen: bool, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut frame = String::new();
    if clear_screen {
        frame.push_str(CLEAR_SCREEN);
    }
    frame.push_str(&view.render());
    frame.push_str("\n\n");
    frame.push_str(FOOTER);
    frame.push('\n');

    out.write_all(frame.as_bytes()).await.context("Failed to write frame")?;
    out.flush().await.context("Failed to flush output")?;
    Ok(())
}
