//! Bearer-token extractor for cache maintenance routes.

use airdrop_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried `Authorization: Bearer <CACHE_ADMIN_TOKEN>`.
///
/// Rejects with 401 when the header is missing, malformed or wrong, and
/// also when no token is configured at all.
///
/// ```ignore
/// async fn operator_only(_: RequireOperator) -> StatusCode {
///     StatusCode::NO_CONTENT
/// }
/// ```
pub struct RequireOperator;

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.cache_admin_token.as_deref() else {
            return Err(unauthorized("Cache maintenance is disabled"));
        };

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        if token != expected {
            tracing::warn!("Rejected cache maintenance request with a wrong token");
            return Err(unauthorized("Invalid operator token"));
        }

        Ok(RequireOperator)
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}
