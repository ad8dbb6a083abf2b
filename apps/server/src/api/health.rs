use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use price_proxy_core::evaluate;

use crate::{main_lib::AppState, models::HealthResponse};

/// Per-asset freshness. 200 only when every asset is healthy.
async fn get_health(State(state): State<Arc<AppState>>) -> Response {
    let report = evaluate(&state.registry, &state.cache.snapshot(), Utc::now());
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = HealthResponse::new(report, state.shutdown.is_triggered());
    (status, Json(body)).into_response()
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
