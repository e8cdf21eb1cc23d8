//! HTTP client for a PostgREST table endpoint.
//!
//! Wraps `GET`/`HEAD` requests against `{base_url}/rest/v1/{table}` using
//! [`reqwest`], authenticating with the service's anonymous key.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use airdrop_core::store::StoreError;

use crate::query::{parse_content_range, QueryParams, DEFAULT_TABLE, ORDERING};

/// Connection settings for the hosted REST service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgrestConfig {
    /// Service root, e.g. `https://project.example.co`.
    pub base_url: String,
    /// Anonymous (public) access key.
    pub anon_key: String,
    /// Table to read from.
    pub table: String,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Full URL of the table endpoint.
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

/// HTTP client for one PostgREST table.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: reqwest::Client,
    config: PostgrestConfig,
}

impl PostgrestClient {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &PostgrestConfig {
        &self.config
    }

    /// Fetch rows with the given column list and predicates.
    ///
    /// Rows are ordered by creation time (newest first), then id.
    pub async fn select<T: DeserializeOwned>(
        &self,
        columns: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, StoreError> {
        let mut query: QueryParams = vec![
            ("select".into(), columns.to_string()),
            ("order".into(), ORDERING.to_string()),
        ];
        query.extend_from_slice(params);

        let response = self
            .request(Method::GET, &query)
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::ensure_success(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Count rows matching the given predicates without transferring them.
    ///
    /// Sends a `HEAD` request with `Prefer: count=exact` and reads the total
    /// from the `Content-Range` response header.
    pub async fn count(&self, params: &[(String, String)]) -> Result<i64, StoreError> {
        let mut query: QueryParams = vec![("select".into(), "id".into())];
        query.extend_from_slice(params);

        let response = self
            .request(Method::HEAD, &query)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::ensure_success(response).await?;
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| StoreError::Decode("missing or malformed Content-Range header".into()))
    }

    // ---- private helpers ----

    fn request(&self, method: Method, query: &[(String, String)]) -> reqwest::RequestBuilder {
        let bearer = format!("Bearer {}", self.config.anon_key);

        self.client
            .request(method, self.config.table_url())
            .query(query)
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, bearer)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    /// Ensure the response has a success status code. A 429 becomes
    /// [`StoreError::RateLimited`]; any other failure becomes
    /// [`StoreError::Http`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(status = status.as_u16(), "Backend rate limited the request");
            return Err(StoreError::RateLimited {
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        Err(StoreError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
