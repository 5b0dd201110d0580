use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::AppState;

const DATA_PROVIDER: &str = "TwelveData";

pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index() -> &'static str {
    "Trading Signals API is running. Use /get_signals or /health."
}

/// Health check endpoint. Probes the data provider on every call.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = Utc::now().to_rfc3339();
    match state.source.probe().await {
        Ok(connected) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "data_provider": DATA_PROVIDER,
                "twelvedata_status": if connected { "connected" } else { "disconnected" },
                "timestamp": timestamp,
                "server_port": state.port,
            })),
        ),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": format!("Health check failed: {e}"),
                    "data_provider": DATA_PROVIDER,
                    "twelvedata_status": "disconnected",
                    "timestamp": timestamp,
                })),
            )
        }
    }
}
