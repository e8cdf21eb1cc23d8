pub mod airdrops;
pub mod cache;
pub mod health;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /airdrops                    paginated, filterable listing
/// /airdrops/summaries          list-view projection of every record
/// /airdrops/all                every record
/// /airdrops/{id}               single record detail
///
/// /cache                       clear the whole response cache (DELETE, operator)
/// /cache/{key}                 clear one cache entry (DELETE, operator)
/// ```
///
/// The `/cache` tree is only mounted when `CACHE_ADMIN_TOKEN` is set.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let routes = Router::new().nest("/airdrops", airdrops::router());

    if config.cache_admin_token.is_some() {
        routes.nest("/cache", cache::router())
    } else {
        routes
    }
}
