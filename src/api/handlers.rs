use actix_web::{get, http::header::ContentType, web, HttpResponse};

use crate::{
    errors::CustomError,
    models::{api_response::success_response, token::BalanceParams},
    services::blockchain_service::BalanceResolver,
};

#[get("/health")]
async fn health() -> HttpResponse {
    success_response("ok")
}

#[get("/tokens/{token_address}/balance")]
async fn get_token_balance(
    resolver: web::Data<BalanceResolver>,
    token_address: web::Path<String>,
    params: web::Query<BalanceParams>,
) -> Result<HttpResponse, CustomError> {
    let query = params.into_inner().into_query(token_address.into_inner());
    let balance = resolver.resolve_balance(&query).await?;
    Ok(success_response(balance))
}

/// Renders `Balance: <amount> <symbol>` as plain text, or nothing when the
/// lookup fails.
#[get("/tokens/{token_address}/balance/display")]
async fn display_token_balance(
    resolver: web::Data<BalanceResolver>,
    token_address: web::Path<String>,
    params: web::Query<BalanceParams>,
) -> HttpResponse {
    let query = params.into_inner().into_query(token_address.into_inner());

    match resolver.resolve_balance(&query).await {
        Ok(balance) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(format!("Balance: {}", balance)),
        Err(e) => {
            log::warn!(
                "Not displaying balance of {} for {}: {}",
                query.token_contract_address,
                query.wallet_address,
                e.message()
            );
            HttpResponse::NoContent().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;
    use std::time::Duration;

    use crate::{api, services::blockchain_service::BalanceResolver};

    const TOKEN: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const WALLET: &str = "0x4adb6f22ae2b16ba538840bcb01bd8bbb0803e03";

    fn resolver() -> web::Data<BalanceResolver> {
        web::Data::new(BalanceResolver::new(
            "http://127.0.0.1:1",
            Duration::from_secs(2),
        ))
    }

    #[actix_web::test]
    async fn health_reports_success() {
        let app =
            test::init_service(App::new().app_data(resolver()).configure(api::config)).await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "SUCCESS");
        assert_eq!(body["result"], "ok");
    }

    #[actix_web::test]
    async fn missing_wallet_is_a_validation_error() {
        let app =
            test::init_service(App::new().app_data(resolver()).configure(api::config)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/tokens/{}/balance", TOKEN))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "FAILURE");
        assert_eq!(body["error"]["code"], 400);
    }

    #[actix_web::test]
    async fn fetch_failure_is_a_bad_gateway_envelope() {
        let app =
            test::init_service(App::new().app_data(resolver()).configure(api::config)).await;

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/tokens/not-an-address/balance?wallet_address={}",
                WALLET
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "FAILURE");
        assert_eq!(body["code"], 502);
        assert!(body["result"].is_null());
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to fetch token balance: invalid token address"));
    }

    #[actix_web::test]
    async fn unreachable_provider_override_does_not_echo_the_url() {
        let app =
            test::init_service(App::new().app_data(resolver()).configure(api::config)).await;

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/tokens/{}/balance?wallet_address={}&provider_url=http%3A%2F%2F127.0.0.1%3A1%2Fv3%2FSECRETKEY123",
                TOKEN, WALLET
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = test::read_body(resp).await;
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("SECRETKEY123"), "{}", body);
    }

    #[actix_web::test]
    async fn display_renders_nothing_on_failure() {
        let app =
            test::init_service(App::new().app_data(resolver()).configure(api::config)).await;

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/tokens/{}/balance/display?wallet_address=0x1234",
                TOKEN
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }
}
