//! Readiness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
}

/// GET /health - 200 once the store answers, 503 `storage_unavailable` otherwise
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.repo.ping().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        storage: "reachable",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
