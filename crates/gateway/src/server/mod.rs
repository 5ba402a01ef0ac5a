use std::{fmt::Display, net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use interface::OrderResult;

use crate::client::ExchangeClient;
use crate::error::GatewayError;
use crate::orders::{execute_twap, place_limit_order, place_market_order, place_oco_order};

type SharedClient = Arc<dyn ExchangeClient>;

/// 주문 API 라우터
/// 주문 라우트는 CLI와 같은 주문 커맨드를 거치므로 같은 검증을 받는다.
pub fn router(client: SharedClient) -> Router {
    Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/api/market", post(market_handler))
        .route("/api/limit", post(limit_handler))
        .route("/api/oco", post(oco_handler))
        .route("/api/twap", post(twap_handler))
        .layer(CorsLayer::permissive())
        .with_state(client)
}

/// API 서버 시작
pub async fn start_server(client: SharedClient, port: u16) -> eyre::Result<()> {
    let dry_run = client.is_dry_run();
    let app = router(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Order API server listening on http://{} (dry run: {})", addr, dry_run);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct MarketRequest {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    side: String,
    #[serde(default)]
    quantity: Value,
}

#[derive(Debug, Deserialize)]
struct LimitRequest {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    side: String,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    price: Value,
}

#[derive(Debug, Deserialize)]
struct OcoRequest {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    side: String,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    take_profit_price: Value,
    #[serde(default)]
    stop_price: Value,
    #[serde(default)]
    stop_limit_price: Value,
}

#[derive(Debug, Deserialize)]
struct TwapRequest {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    side: String,
    #[serde(default)]
    total_quantity: Value,
    #[serde(default)]
    slices: i64,
    #[serde(default)]
    interval_seconds: i64,
}

fn error_response(context: &str, message: impl Display) -> Response {
    error!("API: {} Failed - {}", context, message);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

fn order_response(context: &str, result: Result<OrderResult, GatewayError>) -> Response {
    match result {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(context, e),
    }
}

async fn ping_handler(State(client): State<SharedClient>) -> impl IntoResponse {
    info!("API: Ping request received");
    Json(serde_json::json!({
        "status": "ok",
        "message": "Pong",
        "dry_run": client.is_dry_run(),
    }))
}

async fn market_handler(
    State(client): State<SharedClient>,
    body: Result<Json<MarketRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response("Market Order", rejection.body_text()),
    };

    info!(
        "API: Market Order Request - {} {} {}",
        req.side, req.quantity, req.symbol
    );

    let result = place_market_order(client.as_ref(), &req.symbol, &req.side, &req.quantity).await;
    order_response("Market Order", result)
}

async fn limit_handler(
    State(client): State<SharedClient>,
    body: Result<Json<LimitRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response("Limit Order", rejection.body_text()),
    };

    info!(
        "API: Limit Order Request - {} {} {} @ {}",
        req.side, req.quantity, req.symbol, req.price
    );

    let result = place_limit_order(
        client.as_ref(),
        &req.symbol,
        &req.side,
        &req.quantity,
        &req.price,
    )
    .await;
    order_response("Limit Order", result)
}

async fn oco_handler(
    State(client): State<SharedClient>,
    body: Result<Json<OcoRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response("OCO Order", rejection.body_text()),
    };

    info!(
        "API: OCO Order Request - {} {} {}",
        req.side, req.quantity, req.symbol
    );

    let result = place_oco_order(
        client.as_ref(),
        &req.symbol,
        &req.side,
        &req.quantity,
        &req.take_profit_price,
        &req.stop_price,
        &req.stop_limit_price,
    )
    .await;
    order_response("OCO Order", result)
}

async fn twap_handler(
    State(client): State<SharedClient>,
    body: Result<Json<TwapRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response("TWAP", rejection.body_text()),
    };

    info!(
        "API: TWAP Request - {} {} {} ({} slices every {}s)",
        req.side, req.total_quantity, req.symbol, req.slices, req.interval_seconds
    );

    let result = execute_twap(
        client.as_ref(),
        &req.symbol,
        &req.side,
        &req.total_quantity,
        req.slices,
        req.interval_seconds,
    )
    .await;
    order_response("TWAP", result)
}
