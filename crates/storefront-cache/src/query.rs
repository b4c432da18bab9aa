//! Time-to-live memo of query responses.

use crate::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long a listing response is served from cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: u64,
}

/// Response cache keyed by a canonical query string.
///
/// An entry is served only while `now - stored_at < ttl`. Stale entries are not
/// evicted on read; they are ignored and later overwritten by the next `put` for the
/// same key, or dropped by [`QueryCache::clear`].
pub struct QueryCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V> std::fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.lock().len())
            .finish()
    }
}

impl<V: Clone> QueryCache<V> {
    /// Create a cache with an explicit TTL.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Create a cache with the 30 second [`DEFAULT_TTL`].
    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(DEFAULT_TTL, clock)
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_millis();
        let ttl = self.ttl.as_millis() as u64;
        let entries = self.lock();
        let entry = entries.get(key)?;
        let age = now.saturating_sub(entry.stored_at);
        if age < ttl {
            tracing::debug!(key, age_ms = age, "query cache hit");
            Some(entry.value.clone())
        } else {
            tracing::debug!(key, age_ms = age, "query cache entry stale");
            None
        }
    }

    /// Store a value stamped with the current time, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let stored_at = self.clock.now_millis();
        self.lock().insert(key.into(), Entry { value, stored_at });
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        if !entries.is_empty() {
            tracing::debug!(dropped = entries.len(), "query cache cleared");
        }
        entries.clear();
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<V> QueryCache<V> {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
