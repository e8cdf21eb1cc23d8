//! Repository for the `airdrop_collections` table.
//!
//! Read-only: records are created and maintained outside this service.
//! Filter predicates use nullable parameters so a single statement serves
//! every filter combination.

use airdrop_core::filters::{escape_like, CollectionFilters};
use airdrop_core::pagination::PageRequest;
use sqlx::PgPool;

use crate::models::airdrop_collection::{AirdropCollectionRow, AirdropSummaryRow};

/// Column list for full-row queries.
const COLUMNS: &str = "\
    id::TEXT AS id, created_at, updated_at, name, subtitle, image_url, image_cover, \
    description, COALESCE(backers, '{}') AS backers, chain, \
    cost::DOUBLE PRECISION AS cost, stage::TEXT AS stage, \
    requirements::JSONB AS requirements, how_to_steps::JSONB AS how_to_steps, \
    user_id::TEXT AS user_id";

/// Column list for the list-view projection.
const SUMMARY_COLUMNS: &str = "\
    id::TEXT AS id, name, subtitle, image_url, chain, \
    cost::DOUBLE PRECISION AS cost, stage::TEXT AS stage, \
    COALESCE(backers, '{}') AS backers";

/// Filter predicate shared by the count and page queries.
///
/// `$1` chain, `$2` stage, `$3` cost, `$4` LIKE-escaped search term.
const FILTER_PREDICATE: &str = "\
    ($1::TEXT IS NULL OR chain = $1) \
    AND ($2::TEXT IS NULL OR stage::TEXT = $2) \
    AND ($3::DOUBLE PRECISION IS NULL OR cost::DOUBLE PRECISION = $3) \
    AND ($4::TEXT IS NULL \
         OR name ILIKE '%' || $4 || '%' \
         OR subtitle ILIKE '%' || $4 || '%')";

/// Stable ordering so pages do not overlap.
const ORDERING: &str = "ORDER BY created_at DESC, id";

/// Provides read operations for airdrop collections.
pub struct AirdropCollectionRepo;

impl AirdropCollectionRepo {
    /// List every record.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AirdropCollectionRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM airdrop_collections {ORDERING}");
        sqlx::query_as::<_, AirdropCollectionRow>(&sql)
            .fetch_all(pool)
            .await
    }

    /// List every record, list-view columns only.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<AirdropSummaryRow>, sqlx::Error> {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM airdrop_collections {ORDERING}");
        sqlx::query_as::<_, AirdropSummaryRow>(&sql)
            .fetch_all(pool)
            .await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<AirdropCollectionRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM airdrop_collections WHERE id::TEXT = $1");
        sqlx::query_as::<_, AirdropCollectionRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count records matching `filters`.
    pub async fn count_filtered(
        pool: &PgPool,
        filters: &CollectionFilters,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM airdrop_collections WHERE {FILTER_PREDICATE}");
        let search = filters.search.as_deref().map(escape_like);

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filters.chain.as_deref())
            .bind(filters.stage.map(|s| s.as_str()))
            .bind(filters.cost)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    /// One page of records matching `filters`.
    pub async fn list_filtered(
        pool: &PgPool,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Vec<AirdropCollectionRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM airdrop_collections \
             WHERE {FILTER_PREDICATE} {ORDERING} LIMIT $5 OFFSET $6"
        );
        let search = filters.search.as_deref().map(escape_like);

        sqlx::query_as::<_, AirdropCollectionRow>(&sql)
            .bind(filters.chain.as_deref())
            .bind(filters.stage.map(|s| s.as_str()))
            .bind(filters.cost)
            .bind(search)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(pool)
            .await
    }
}
