//! Airdrop directory API server library.
//!
//! Exposes the building blocks (config, state, data access, error handling,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
