use axum::routing::delete;
use axum::Router;

use crate::handlers::cache;
use crate::state::AppState;

/// Cache maintenance routes mounted at `/cache`.
///
/// ```text
/// DELETE /          -> clear_all
/// DELETE /{key}     -> clear_key
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(cache::clear_all))
        .route("/{key}", delete(cache::clear_key))
}
