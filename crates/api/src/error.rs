use airdrop_core::error::CoreError;
use airdrop_core::resilience::RateLimited;
use airdrop_core::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Shown when neither backend is configured.
pub const CONFIG_MISSING_MESSAGE: &str =
    "Backend configuration is missing. Please check your environment variables.";

/// Shown when the backend keeps rate limiting after every retry.
pub const RATE_LIMITED_MESSAGE: &str =
    "We're experiencing high traffic. Please try again in a moment.";

/// Shown for any other backend failure.
pub const UPSTREAM_ERROR_MESSAGE: &str =
    "There was an error loading the data. Please try again later.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for backend
/// failures, and adds the missing-configuration case. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `airdrop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backend read that failed after its retries.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No backend is configured for a page that needs live data.
    #[error("Backend configuration is missing")]
    ConfigMissing,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Backend errors ---
            AppError::Store(err) if err.is_rate_limited() => {
                tracing::warn!(error = %err, "Backend rate limit persisted after retries");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "RATE_LIMITED",
                    RATE_LIMITED_MESSAGE.to_string(),
                )
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Backend error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    UPSTREAM_ERROR_MESSAGE.to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::ConfigMissing => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIG_MISSING",
                CONFIG_MISSING_MESSAGE.to_string(),
            ),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if code == "UPSTREAM_ERROR" {
            body["retry"] = json!(true);
        }

        (status, axum::Json(body)).into_response()
    }
}
