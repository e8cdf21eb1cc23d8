use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Active data source (`postgres`, `postgrest` or `fixtures`).
    pub backend: &'static str,
    /// Whether the configured backend answered a probe.
    pub backend_healthy: bool,
}

/// GET /health -- returns service and backend health.
///
/// Without a configured backend the service still answers with sample
/// data, but reports itself as degraded.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_healthy = match state.catalog.store() {
        Some(store) => store.ping().await.is_ok(),
        None => false,
    };

    let status = if backend_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend: state.catalog.backend_name(),
        backend_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
