//! Health check endpoint
//!
//! Reports whether the store answers a ping; 503 when it does not.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::Connection;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match state.pool().acquire().await {
        Ok(mut conn) => conn.ping().await.is_ok(),
        Err(_) => false,
    };

    if reachable {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "up",
                version: env!("CARGO_PKG_VERSION"),
            }),
        )
    } else {
        tracing::warn!("health check: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "down",
                version: env!("CARGO_PKG_VERSION"),
            }),
        )
    }
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
