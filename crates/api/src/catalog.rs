//! Data access functions for the directory pages.
//!
//! Every read goes through [`with_retry_and_cache`] under a stable cache key.
//! Without a configured backend the built-in sample records are served; when
//! a backend call still fails after its retries, the sample records are
//! served too unless fixture fallback has been switched off.

use std::future::Future;
use std::sync::Arc;

use airdrop_core::collection::{AirdropCollection, CollectionSummary};
use airdrop_core::filters::{filtered_cache_key, CollectionFilters};
use airdrop_core::fixtures;
use airdrop_core::pagination::{PageRequest, Paginated};
use airdrop_core::resilience::{with_retry_and_cache, FetchOptions, ResponseCache, RetryPolicy};
use airdrop_core::store::{CollectionStore, StoreError};

/// Cache key for the full record list.
pub const ALL_COLLECTIONS_KEY: &str = "all-airdrops";

/// Cache key for the list-view projection.
pub const LIST_COLLECTIONS_KEY: &str = "airdrops-list";

/// Label reported when no backend is configured.
pub const FIXTURE_BACKEND: &str = "fixtures";

pub fn collection_cache_key(id: &str) -> String {
    format!("airdrop-{id}")
}

pub fn paginated_cache_key(request: PageRequest) -> String {
    format!("paginated-airdrops-{}-{}", request.page, request.page_size)
}

/// Cached, retrying reads over an optional [`CollectionStore`].
pub struct Catalog {
    store: Option<Arc<dyn CollectionStore>>,
    cache: ResponseCache,
    policy: RetryPolicy,
    fixture_fallback: bool,
}

impl Catalog {
    pub fn new(store: Option<Arc<dyn CollectionStore>>, policy: RetryPolicy) -> Self {
        Self {
            store,
            cache: ResponseCache::new(),
            policy,
            fixture_fallback: true,
        }
    }

    /// A catalog that only ever serves the sample records.
    pub fn unconfigured() -> Self {
        Self::new(None, RetryPolicy::default())
    }

    pub fn with_fixture_fallback(mut self, enabled: bool) -> Self {
        self.fixture_fallback = enabled;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&Arc<dyn CollectionStore>> {
        self.store.as_ref()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.as_ref().map_or(FIXTURE_BACKEND, |store| store.name())
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub async fn all_collections(&self) -> Result<Vec<AirdropCollection>, StoreError> {
        self.load(
            ALL_COLLECTIONS_KEY,
            |store| async move { store.select_all().await },
            fixtures::sample_collections,
        )
        .await
    }

    /// Records projected to the list-view columns.
    pub async fn collections_for_list(&self) -> Result<Vec<CollectionSummary>, StoreError> {
        self.load(
            LIST_COLLECTIONS_KEY,
            |store| async move { store.select_summaries().await },
            fixtures::summaries,
        )
        .await
    }

    pub async fn collection_by_id(&self, id: &str) -> Result<Option<AirdropCollection>, StoreError> {
        self.load(
            &collection_cache_key(id),
            |store| async move { store.select_by_id(id).await },
            || fixtures::find_by_id(id),
        )
        .await
    }

    /// One page of every record, plus the total count.
    pub async fn paginated(
        &self,
        request: PageRequest,
    ) -> Result<Paginated<AirdropCollection>, StoreError> {
        let filters = CollectionFilters::default();
        self.load(
            &paginated_cache_key(request),
            |store| fetch_page(store, &filters, request),
            || fixtures::paginated(request),
        )
        .await
    }

    /// One page of the records matching `filters`, plus their total count.
    pub async fn filtered(
        &self,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Paginated<AirdropCollection>, StoreError> {
        self.load(
            &filtered_cache_key(filters, request),
            |store| fetch_page(store, filters, request),
            || fixtures::filtered(filters, request),
        )
        .await
    }

    /// Drop one cached entry, or all of them when `key` is `None`.
    pub async fn clear_cache(&self, key: Option<&str>) {
        self.cache.clear(key).await;
        tracing::info!(cache_key = key.unwrap_or("*"), "Response cache cleared");
    }

    async fn load<T, F, Fut>(
        &self,
        key: &str,
        mut op: F,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, StoreError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut(Arc<dyn CollectionStore>) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let Some(store) = &self.store else {
            tracing::warn!(cache_key = key, "No backend configured, serving sample data");
            return Ok(fallback());
        };

        let result = with_retry_and_cache(
            &self.cache,
            &self.policy,
            key,
            FetchOptions::default(),
            || op(Arc::clone(store)),
        )
        .await;

        match result {
            Err(err) if self.fixture_fallback => {
                tracing::warn!(
                    cache_key = key,
                    backend = store.name(),
                    error = %err,
                    "Serving sample data after backend failure",
                );
                Ok(fallback())
            }
            other => other,
        }
    }
}

/// Count first so an empty result never issues the page query.
async fn fetch_page(
    store: Arc<dyn CollectionStore>,
    filters: &CollectionFilters,
    request: PageRequest,
) -> Result<Paginated<AirdropCollection>, StoreError> {
    let count = store.count(filters).await?;
    if count == 0 {
        return Ok(Paginated::empty());
    }

    let data = store.select_page(filters, request).await?;
    Ok(Paginated { data, count })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
