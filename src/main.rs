//! Coin Ticker - live cryptocurrency price table
//!
//! `serve` runs the CoinMarketCap proxy backend, `watch` the polling dashboard.

use anyhow::Result;
use coin_ticker::adapters::cli;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (CRYPTO_API goes here, not in the config file)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
