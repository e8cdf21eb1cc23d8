//! Backend seam for reading collection records.
//!
//! Two implementations exist: a direct PostgreSQL store (`airdrop-db`) and a
//! hosted REST store (`airdrop-postgrest`). The data access layer only sees
//! `dyn CollectionStore`.

use async_trait::async_trait;

use crate::collection::{AirdropCollection, CollectionSummary};
use crate::filters::CollectionFilters;
use crate::pagination::PageRequest;
use crate::resilience::RateLimited;

/// Substring that marks a rate-limited failure in upstream messages.
pub const RATE_LIMIT_MARKER: &str = "Too Many Requests";

/// HTTP status signalling a rate-limited request.
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Errors surfaced by a collection store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The upstream rejected the call for excessive request volume.
    #[error("Too Many Requests: {message}")]
    RateLimited { message: String },

    /// The upstream answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (network, DNS, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A response or row could not be converted into a record.
    #[error("Failed to decode record: {0}")]
    Decode(String),
}

impl StoreError {
    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::RateLimited { .. } => Some(RATE_LIMIT_STATUS),
            StoreError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl RateLimited for StoreError {
    fn is_rate_limited(&self) -> bool {
        self.status() == Some(RATE_LIMIT_STATUS) || self.to_string().contains(RATE_LIMIT_MARKER)
    }
}

/// Read-only access to the `airdrop_collections` data set.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Short backend label for logs and health output.
    fn name(&self) -> &'static str;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn select_all(&self) -> Result<Vec<AirdropCollection>, StoreError>;

    async fn select_summaries(&self) -> Result<Vec<CollectionSummary>, StoreError>;

    async fn select_by_id(&self, id: &str) -> Result<Option<AirdropCollection>, StoreError>;

    /// Count records matching `filters` (empty filters count everything).
    async fn count(&self, filters: &CollectionFilters) -> Result<i64, StoreError>;

    /// Fetch one page of records matching `filters`.
    async fn select_page(
        &self,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Vec<AirdropCollection>, StoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
