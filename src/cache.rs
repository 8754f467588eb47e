use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::models::ForecastModel;

/// Source of "now" for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache key built from rounded coordinates and the model tag,
/// e.g. `37.0331,-119.3372-hrrr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, model: ForecastModel) -> Self {
        Self(format!("{latitude:.4},{longitude:.4}-{}", model.tag()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct StoredEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// In-memory response cache with a fixed staleness window.
///
/// Expired entries are kept until [`ResponseCache::purge_expired`] so they
/// can still be served after an upstream failure.
pub struct ResponseCache<V> {
    entries: HashMap<CacheKey, StoredEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResponseCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Value stored less than one TTL ago
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self), fields(key = %key))]
    pub fn get_fresh(&self, key: &CacheKey) -> Option<V> {
        let Some(entry) = self.entries.get(key) else {
            tracing::debug!("Key not found");
            return None;
        };

        if self.is_fresh(entry) {
            tracing::debug!("Key found and still fresh");
            Some(entry.value.clone())
        } else {
            tracing::debug!("Key found but expired");
            None
        }
    }

    /// Value regardless of age
    #[must_use]
    pub fn get_any(&self, key: &CacheKey) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value), fields(key = %key))]
    pub fn put(&mut self, key: CacheKey, value: V) {
        let stored_at = self.clock.now();
        self.entries.insert(key, StoredEntry { value, stored_at });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries, returns how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.stored_at < ttl);
        before - self.entries.len()
    }

    fn is_fresh(&self, entry: &StoredEntry<V>) -> bool {
        self.clock.now() - entry.stored_at < self.ttl
    }
}
