use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::cache::ResponseCache;

/// Retries after the first attempt (so up to four attempts in total).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the first retry; doubles for every following one.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// How long a cached response stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(60_000);

/// Classifies errors that signal excessive request volume.
///
/// Only rate-limited failures are retried; every other error is returned
/// to the caller after the first attempt.
pub trait RateLimited {
    fn is_rate_limited(&self) -> bool;
}

/// Process-wide defaults for the retry/cache wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub cache_ttl: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt + 1`: `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Per-call overrides of the [`RetryPolicy`] defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub max_retries: Option<u32>,
    pub cache_ttl: Option<Duration>,
    /// Neither read nor populate the cache.
    pub skip_cache: bool,
}

impl FetchOptions {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn skip_cache(mut self) -> Self {
        self.skip_cache = true;
        self
    }
}

/// Run `op`, serving and populating `cache` under `key`.
///
/// A cached value younger than the effective TTL is returned without
/// calling `op`. Otherwise `op` runs up to `max_retries + 1` times: a
/// rate-limited error waits `base_delay * 2^attempt` and tries again, any
/// other error (or the last rate-limited one) is returned unchanged. Only
/// successful results are cached.
pub async fn with_retry_and_cache<T, E, F, Fut>(
    cache: &ResponseCache,
    policy: &RetryPolicy,
    key: &str,
    options: FetchOptions,
    mut op: F,
) -> Result<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: RateLimited + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_retries = options.max_retries.unwrap_or(policy.max_retries);
    let ttl = options.cache_ttl.unwrap_or(policy.cache_ttl);

    if !options.skip_cache {
        if let Some(cached) = cache.get::<T>(key, ttl).await {
            tracing::debug!(cache_key = key, "Serving cached response");
            return Ok(cached);
        }
    }

    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => {
                if !options.skip_cache {
                    cache.insert(key, value.clone()).await;
                }
                return Ok(value);
            }
            Err(err) => {
                if attempt >= max_retries || !err.is_rate_limited() {
                    tracing::error!(
                        cache_key = key,
                        attempts = attempt + 1,
                        error = %err,
                        "Backend call failed",
                    );
                    return Err(err);
                }

                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    cache_key = key,
                    delay_ms = delay.as_millis() as u64,
                    "Attempt {}/{max_retries} rate limited, retrying",
                    attempt + 1,
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
