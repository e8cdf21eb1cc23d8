//! Retry-with-backoff and time-bounded response caching for backend calls.
//!
//! [`ResponseCache`] is an owned component handed to whoever needs it; there
//! is no process-global cache. [`with_retry_and_cache`] serves a fresh cached
//! value when one exists and otherwise runs the operation, retrying only
//! rate-limited failures with exponential backoff.
//!
//! Concurrent calls for the same key are not coalesced: each one that misses
//! the cache runs the operation, and the last successful writer wins.

mod cache;
mod retry;

pub use cache::ResponseCache;
pub use retry::{
    with_retry_and_cache, FetchOptions, RateLimited, RetryPolicy, DEFAULT_BASE_DELAY,
    DEFAULT_CACHE_TTL, DEFAULT_MAX_RETRIES,
};
