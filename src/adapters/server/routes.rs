use actix_web::{
    get,
    web::{self, ServiceConfig},
    HttpResponse, Responder,
};

use crate::ports::QuoteSource;
use super::envelope::CoinsResponse;

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().body("Coin Ticker backend")
}

/// The `coins` query. Every call goes upstream; nothing is cached.
#[get("/api/coins")]
async fn coins(source: web::Data<dyn QuoteSource>) -> impl Responder {
    match source.list_coins().await {
        Ok(coins) => {
            tracing::debug!("Served {} coins", coins.len());
            HttpResponse::Ok().json(CoinsResponse::ok(coins))
        }
        Err(e) => {
            tracing::error!("coins query failed: {}", e);
            HttpResponse::Ok().json(CoinsResponse::error(e.public_message()))
        }
    }
}

pub fn init(config: &mut ServiceConfig) {
    config.service(home).service(coins);
}
