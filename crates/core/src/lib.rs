//! Domain layer for the airdrop directory.
//!
//! Holds the record model, query shapes (filters, pagination), the offline
//! fixture set, the backend seam every store implements, and the
//! retry/cache wrapper the data access layer runs store calls through.
//! Nothing in here talks to the network or a database directly.

pub mod checklist;
pub mod collection;
pub mod error;
pub mod filters;
pub mod fixtures;
pub mod pagination;
pub mod resilience;
pub mod store;
pub mod types;
