//! Route definitions for the airdrop directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::airdrops;
use crate::state::AppState;

/// Directory routes mounted at `/airdrops`.
///
/// ```text
/// GET /             -> list_airdrops
/// GET /summaries    -> list_summaries
/// GET /all          -> list_all
/// GET /{id}         -> get_airdrop
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(airdrops::list_airdrops))
        .route("/summaries", get(airdrops::list_summaries))
        .route("/all", get(airdrops::list_all))
        .route("/{id}", get(airdrops::get_airdrop))
}
