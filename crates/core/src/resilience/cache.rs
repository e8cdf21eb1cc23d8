use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

type Payload = Arc<dyn Any + Send + Sync>;

/// A cached value and the moment it was stored.
struct CacheEntry {
    payload: Payload,
    inserted_at: Instant,
}

/// Key/value cache of backend responses with lazy, read-time expiry.
///
/// Entries are never proactively removed; staleness is only detected when
/// the same key is read again. Thread-safe via interior `RwLock`; clones
/// share the same underlying map.
#[derive(Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    /// Create a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value stored under `key` if it is younger than `ttl` and
    /// was stored as a `T`.
    pub async fn get<T>(&self, key: &str, ttl: Duration) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.inserted_at.elapsed() >= ttl {
            return None;
        }

        let payload = Arc::clone(&entry.payload);
        drop(entries);

        payload.downcast::<T>().ok().map(|value| (*value).clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn insert<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        let entry = CacheEntry {
            payload: Arc::new(value),
            inserted_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Remove one key, or every key when `key` is `None`.
    pub async fn clear(&self, key: Option<&str>) {
        let mut entries = self.entries.write().await;
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
