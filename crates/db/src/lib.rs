//! Direct PostgreSQL backend for the airdrop directory.
//!
//! Connects straight to the database behind the hosted service and reads
//! the `airdrop_collections` table with `sqlx`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgCollectionStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL without dialing it.
///
/// Connections open on first use, so an unreachable database surfaces as a
/// failed read rather than a failed startup. Only a malformed URL errors
/// here. Acquiring a connection gives up after five seconds; callers see
/// that as a rate-limited failure (see [`store::map_sqlx_error`]).
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
