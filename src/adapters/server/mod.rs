//! Backend HTTP Server
//!
//! Exposes the `coins` query over HTTP with actix-web. Each request is
//! resolved independently against the injected `QuoteSource`.

mod envelope;
mod routes;

pub use envelope::{CoinsData, CoinsResponse, QueryErrorBody};
pub use routes::init;

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{web::Data, App, HttpServer};

use crate::ports::QuoteSource;

/// Bind and run until the server is stopped (Ctrl+C is handled by actix).
pub async fn serve(source: Arc<dyn QuoteSource>, host: &str, port: u16) -> std::io::Result<()> {
    let source: Data<dyn QuoteSource> = Data::from(source);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(source.clone())
            .wrap(Cors::permissive())
            .configure(routes::init)
    })
    .bind((host, port))?
    .run();

    tracing::info!("Server running at http://{}:{}", host, port);
    server.await
}
