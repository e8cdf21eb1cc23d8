//! Hosted REST backend for the airdrop directory.
//!
//! Talks to a PostgREST endpoint (the `/rest/v1` surface of a hosted
//! Postgres service) with an anonymous access key, translating collection
//! filters and pages into PostgREST query parameters.

pub mod client;
pub mod query;
pub mod store;

pub use client::{PostgrestClient, PostgrestConfig};
pub use store::PostgrestCollectionStore;
