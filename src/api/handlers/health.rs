use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let latency_ms = state
        .gateway
        .latency()
        .map(|rtt| rtt.as_micros() as f64 / 1000.0);

    if state.gateway.is_connected() {
        (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "gateway": "connected", "latency_ms": latency_ms })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "gateway": "disconnected" })),
        )
    }
}
