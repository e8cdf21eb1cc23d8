//! Handlers for response cache maintenance.
//!
//! Both handlers require the operator token; an anonymous flush would send
//! every following page render back to the backend.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::middleware::operator::RequireOperator;
use crate::state::AppState;

/// DELETE /api/v1/cache
///
/// Drop every cached backend response.
pub async fn clear_all(_operator: RequireOperator, State(state): State<AppState>) -> StatusCode {
    state.catalog.clear_cache(None).await;
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/cache/{key}
///
/// Drop one cached response. Unknown keys are not an error.
pub async fn clear_key(
    _operator: RequireOperator,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> StatusCode {
    state.catalog.clear_cache(Some(&key)).await;
    StatusCode::NO_CONTENT
}
