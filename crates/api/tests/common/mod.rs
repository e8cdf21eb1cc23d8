#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use airdrop_api::catalog::Catalog;
use airdrop_api::config::{BackendConfig, ServerConfig};
use airdrop_api::router::build_app_router;
use airdrop_api::state::AppState;
use airdrop_core::collection::{AirdropCollection, CollectionSummary};
use airdrop_core::filters::CollectionFilters;
use airdrop_core::fixtures;
use airdrop_core::pagination::{paginate, PageRequest};
use airdrop_core::resilience::RetryPolicy;
use airdrop_core::store::{CollectionStore, StoreError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// In-memory [`CollectionStore`] that filters and pages like a real backend.
///
/// Starts with the sample records; `failing` makes every call return the
/// given error. `calls` counts store round-trips so tests can observe the
/// response cache.
#[derive(Default)]
pub struct StubStore {
    pub records: Vec<AirdropCollection>,
    pub failure: Option<StoreError>,
    pub calls: AtomicUsize,
}

impl StubStore {
    pub fn with_samples() -> Self {
        Self::with_records(fixtures::sample_collections())
    }

    pub fn with_records(records: Vec<AirdropCollection>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn failing(err: StoreError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn matching(&self, filters: &CollectionFilters) -> Vec<AirdropCollection> {
        self.records
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CollectionStore for StubStore {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.hit()
    }

    async fn select_all(&self) -> Result<Vec<AirdropCollection>, StoreError> {
        self.hit()?;
        Ok(self.records.clone())
    }

    async fn select_summaries(&self) -> Result<Vec<CollectionSummary>, StoreError> {
        self.hit()?;
        Ok(self.records.iter().map(CollectionSummary::from).collect())
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<AirdropCollection>, StoreError> {
        self.hit()?;
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self, filters: &CollectionFilters) -> Result<i64, StoreError> {
        self.hit()?;
        Ok(self.matching(filters).len() as i64)
    }

    async fn select_page(
        &self,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Vec<AirdropCollection>, StoreError> {
        self.hit()?;
        Ok(paginate(&self.matching(filters), request).data)
    }
}

/// Operator token configured by [`test_config`].
pub const TEST_OPERATOR_TOKEN: &str = "test-operator-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Retries are disabled so failing stores answer immediately.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend: BackendConfig::Unconfigured,
        db_max_connections: 1,
        retry_policy: RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        },
        fixture_fallback: true,
        cache_admin_token: Some(TEST_OPERATOR_TOKEN.to_string()),
    }
}

/// Build the full application router over `catalog`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(catalog: Catalog) -> Router {
    build_test_app_with_config(catalog, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied config.
pub fn build_test_app_with_config(catalog: Catalog, config: ServerConfig) -> Router {
    let state = AppState {
        catalog: Arc::new(catalog),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Catalog over `store` with the test retry policy.
pub fn catalog_over(store: Arc<StubStore>, fixture_fallback: bool) -> Catalog {
    let store: Arc<dyn CollectionStore> = store;
    Catalog::new(Some(store), test_config().retry_policy).with_fixture_fallback(fixture_fallback)
}

/// App over a stub store holding the sample records.
pub fn app_with_samples() -> (Router, Arc<StubStore>) {
    let store = Arc::new(StubStore::with_samples());
    (build_test_app(catalog_over(Arc::clone(&store), true)), store)
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    send_with_token(app, method, uri, None).await
}

/// Send a request, optionally carrying `Authorization: Bearer <token>`.
pub async fn send_with_token(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

/// Anonymous DELETE.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri).await
}

/// DELETE carrying the test operator token.
pub async fn delete_as_operator(app: Router, uri: &str) -> Response<Body> {
    send_with_token(app, Method::DELETE, uri, Some(TEST_OPERATOR_TOKEN)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
