//! In-memory LRU cache of filtered feature collections.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use footprint_core::constants::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS};
use footprint_core::types::{CacheKey, FeatureCollection};

use crate::stats::CacheStats;

/// Cache entry. Never mutated after insertion.
struct CacheEntry {
    value: Arc<FeatureCollection>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Lifetime of an entry, measured from insertion
    pub ttl: Duration,
    /// When false, lookups always miss and inserts are dropped
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            enabled: true,
        }
    }
}

impl CacheConfig {
    /// A configuration that caches nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Sets the maximum number of entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enables or disables the cache.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Bounded, time-expiring cache of query results.
///
/// One mutex guards the LRU list, so each `get` (recency refresh, lazy
/// expiry) and each `set` (replacement, eviction) is atomic.
pub struct QueryCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    config: CacheConfig,
    stats: Arc<CacheStats>,
}

impl QueryCache {
    /// Creates a cache with the given configuration.
    ///
    /// A `max_entries` of zero is treated as one.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            config,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Creates a cache with 100 entries and a five minute TTL.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Returns the cached value for `key`, refreshing its recency.
    ///
    /// An entry past its TTL is removed and reported as absent.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<FeatureCollection>> {
        if !self.config.enabled {
            self.stats.record_miss();
            return None;
        }

        let mut entries = self.entries.lock();

        let expired = match entries.peek(key) {
            Some(entry) => entry.is_expired(self.config.ttl),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            entries.pop(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_entry_count(entries.len());
            trace!(key = %key, "Cache entry expired");
            return None;
        }

        let value = entries.get(key).map(|entry| Arc::clone(&entry.value));
        self.stats.record_hit();
        value
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// At capacity the least-recently-used entry is evicted first.
    pub fn set(&self, key: CacheKey, value: Arc<FeatureCollection>) {
        if !self.config.enabled {
            return;
        }

        let mut entries = self.entries.lock();
        let replacing = entries.contains(&key);

        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Some((evicted, _)) = entries.push(key, entry) {
            if !replacing {
                self.stats.record_eviction();
                debug!(key = %evicted, "Evicted least-recently-used entry");
            }
        }

        self.stats.set_entry_count(entries.len());
    }

    /// Removes the entry for `key`. Returns true if one was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let mut entries = self.entries.lock();
        let removed = entries.pop(key).is_some();
        self.stats.set_entry_count(entries.len());
        removed
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.clear();
        self.stats.set_entry_count(0);
    }

    /// Removes all entries past their TTL and returns how many were removed.
    pub fn expire_stale(&self) -> usize {
        let mut entries = self.entries.lock();
        let ttl = self.config.ttl;

        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        self.stats.record_expirations(expired.len() as u64);
        self.stats.set_entry_count(entries.len());
        expired.len()
    }

    /// Returns the number of entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns true if `key` has an entry, without touching recency or expiry.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains(key)
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("enabled", &self.config.enabled)
            .field("max_entries", &self.config.max_entries)
            .field("ttl", &self.config.ttl)
            .field("current_entries", &self.len())
            .finish()
    }
}
