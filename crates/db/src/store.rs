//! [`CollectionStore`] implementation over a PostgreSQL pool.

use airdrop_core::collection::{AirdropCollection, CollectionSummary};
use airdrop_core::filters::CollectionFilters;
use airdrop_core::pagination::PageRequest;
use airdrop_core::store::{CollectionStore, StoreError, RATE_LIMIT_MARKER};
use async_trait::async_trait;

use crate::repositories::AirdropCollectionRepo;
use crate::DbPool;

/// PostgreSQL SQLSTATE for `too_many_connections`.
const SQLSTATE_TOO_MANY_CONNECTIONS: &str = "53300";

/// Reads collections straight from the database.
#[derive(Clone)]
pub struct PgCollectionStore {
    pool: DbPool,
}

impl PgCollectionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Translate a sqlx error into a [`StoreError`].
///
/// Connection exhaustion (pool acquire timeout or the server refusing more
/// connections) is the database analogue of a rate limit and is reported
/// as one so the caller backs off and retries.
pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut => StoreError::RateLimited {
            message: "connection pool exhausted".into(),
        },
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(SQLSTATE_TOO_MANY_CONNECTIONS) =>
        {
            StoreError::RateLimited {
                message: db_err.message().to_string(),
            }
        }
        sqlx::Error::Database(db_err) if db_err.message().contains(RATE_LIMIT_MARKER) => {
            StoreError::RateLimited {
                message: db_err.message().to_string(),
            }
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
            StoreError::Transport(err.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Decode(err.to_string())
        }
        _ => StoreError::Database(err.to_string()),
    }
}

fn decode_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Decode(err.to_string())
}

#[async_trait]
impl CollectionStore for PgCollectionStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx_error)
    }

    async fn select_all(&self) -> Result<Vec<AirdropCollection>, StoreError> {
        AirdropCollectionRepo::list_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(|row| AirdropCollection::try_from(row).map_err(decode_error))
            .collect()
    }

    async fn select_summaries(&self) -> Result<Vec<CollectionSummary>, StoreError> {
        AirdropCollectionRepo::list_summaries(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(|row| CollectionSummary::try_from(row).map_err(decode_error))
            .collect()
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<AirdropCollection>, StoreError> {
        AirdropCollectionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(|row| AirdropCollection::try_from(row).map_err(decode_error))
            .transpose()
    }

    async fn count(&self, filters: &CollectionFilters) -> Result<i64, StoreError> {
        AirdropCollectionRepo::count_filtered(&self.pool, filters)
            .await
            .map_err(map_sqlx_error)
    }

    async fn select_page(
        &self,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Vec<AirdropCollection>, StoreError> {
        AirdropCollectionRepo::list_filtered(&self.pool, filters, request)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(|row| AirdropCollection::try_from(row).map_err(decode_error))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
