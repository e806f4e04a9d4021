use actix_web::web;

use crate::errors::CustomError;

mod handlers;

pub fn config(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| CustomError::ValidationError(err.to_string()).into());

    cfg.service(
        web::scope("/api/v1")
            .app_data(query_config)
            .service(handlers::health)
            .service(handlers::get_token_balance)
            .service(handlers::display_token_balance),
    );
}
