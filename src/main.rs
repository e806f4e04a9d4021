use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::io;

mod api;
mod config;
mod errors;
mod models;
mod services;

use services::blockchain_service::BalanceResolver;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let resolver = web::Data::new(BalanceResolver::from_config(&config));
    let allowed_origins = config.allowed_origins.clone();

    log::info!(
        "Listening on {}:{} (rpc timeout {:?})",
        config.host,
        config.port,
        config.rpc_timeout
    );

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT]);
        App::new()
            .app_data(resolver.clone())
            .configure(api::config)
            .wrap(cors)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
