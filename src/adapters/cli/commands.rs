//! CLI Command Handlers
//!
//! `serve` runs the backend, `watch` runs the live dashboard, `list` prints
//! the table once.

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::adapters::coinmarketcap::{CoinMarketCapClient, CoinMarketCapConfig};
use crate::adapters::coins_api::CoinsApiClient;
use crate::adapters::server;
use crate::application::{
    spawn_line_reader, Dashboard, LiveTableView, PollEvent, PollerConfig, ViewCommand,
};
use crate::config::{load_config, Config};
use crate::ports::QuoteSource;

/// Coin Ticker - live cryptocurrency price table
#[derive(Parser, Debug)]
#[command(
    name = "coin-ticker",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Live cryptocurrency price table backed by CoinMarketCap",
    long_about = "Coin Ticker proxies the CoinMarketCap listings endpoint behind a single \
                  `coins` query and renders it as a searchable, auto-refreshing terminal table."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the backend serving the `coins` query
    Serve(ServeCmd),

    /// Open the live price table
    Watch(WatchCmd),

    /// Fetch once and print the price table
    List(ListCmd),
}

/// Run the backend
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override listen host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override listen port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Live dashboard
#[derive(Parser, Debug)]
pub struct WatchCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override backend `coins` endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Initial search term
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Keep polling after a failed poll
    #[arg(long)]
    pub keep_polling: bool,

    /// Poll CoinMarketCap directly instead of the backend
    #[arg(long)]
    pub direct: bool,

    /// Disable colours and screen clearing
    #[arg(long)]
    pub plain: bool,
}

/// One-shot listing
#[derive(Parser, Debug)]
pub struct ListCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override backend `coins` endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Only show coins whose name contains TERM
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Query CoinMarketCap directly instead of the backend
    #[arg(long)]
    pub direct: bool,
}

impl Command {
    fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Serve(cmd) => cmd.config.as_deref(),
            Command::Watch(cmd) => cmd.config.as_deref(),
            Command::List(cmd) => cmd.config.as_deref(),
        }
    }
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    let config = resolve_config(app.command.config_path())?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Serve(cmd) => serve_command(cmd, config).await,
        Command::Watch(cmd) => watch_command(cmd, config).await,
        Command::List(cmd) => list_command(cmd, config).await,
    }
}

/// Load the config file if one was given, defaults otherwise
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => Ok(Config::default()),
    }
}

/// Initialize logging system
///
/// Logs go to stderr so they never interleave with the table on stdout.
fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        config_level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn provider_client(config: &Config) -> Result<Arc<dyn QuoteSource>> {
    let client = CoinMarketCapClient::with_config(CoinMarketCapConfig::from(&config.provider))
        .context("Failed to create CoinMarketCap client")?;
    Ok(Arc::new(client))
}

fn backend_client(config: &Config, endpoint: Option<String>) -> Result<Arc<dyn QuoteSource>> {
    let endpoint = endpoint.unwrap_or_else(|| config.client.endpoint.clone());
    let client = CoinsApiClient::new(endpoint, config.provider.timeout())
        .context("Failed to create backend client")?;
    Ok(Arc::new(client))
}

/// Handle serve command
async fn serve_command(cmd: ServeCmd, config: Config) -> Result<()> {
    let host = cmd.host.unwrap_or_else(|| config.server.host.clone());
    let port = cmd.port.unwrap_or(config.server.port);

    tracing::info!("Starting coins backend on {}:{}", host, port);
    let source = provider_client(&config)?;

    server::serve(source, &host, port)
        .await
        .with_context(|| format!("Server on {}:{} failed", host, port))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Handle watch command
async fn watch_command(cmd: WatchCmd, config: Config) -> Result<()> {
    let source = if cmd.direct {
        provider_client(&config)?
    } else {
        backend_client(&config, cmd.endpoint)?
    };

    let mut poller_config = PollerConfig::from(&config.client);
    if let Some(ms) = cmd.interval_ms {
        anyhow::ensure!(ms > 0, "--interval-ms must be > 0");
        poller_config.interval = std::time::Duration::from_millis(ms);
    }
    if cmd.keep_polling {
        poller_config.stop_on_error = false;
    }

    let ansi = config.client.ansi && !cmd.plain;
    let view = LiveTableView::new(ansi)
        .with_search_term(cmd.search.unwrap_or_default())
        .with_dark_mode(cmd.dark);

    let (commands, command_rx) = mpsc::channel(16);
    spawn_line_reader(BufReader::new(std::io::stdin()), commands.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            commands.send(ViewCommand::Quit).await.ok();
        }
    });

    let mut stdout = tokio::io::stdout();
    Dashboard::new(source, poller_config, view)
        .with_clear_screen(ansi)
        .run(command_rx, &mut stdout)
        .await?;

    Ok(())
}

/// Handle list command
async fn list_command(cmd: ListCmd, config: Config) -> Result<()> {
    let source = if cmd.direct {
        provider_client(&config)?
    } else {
        backend_client(&config, cmd.endpoint)?
    };

    let event = match source.list_coins().await {
        Ok(coins) => PollEvent::Loaded { coins, fetched_at: chrono::Utc::now() },
        Err(e) => {
            tracing::warn!("Listing failed: {}", e);
            PollEvent::Failed(e)
        }
    };

    let mut view = LiveTableView::new(false).with_search_term(cmd.search.unwrap_or_default());
    view.apply(event);
    println!("{}", view.render());

    anyhow::ensure!(!view.is_failed(), "coin listing failed");
    Ok(())
}
