//! The query engine: cache lookup, predicate evaluation, cache population.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use footprint_cache::{CacheConfig, CacheStatsSnapshot, QueryCache};
use footprint_core::error::{FootprintError, Result};
use footprint_core::predicates::matches_all;
use footprint_core::types::{BuildingQuery, FeatureCollection, SummaryStats};
use footprint_store::FeatureStore;

use crate::summary::summarize;

/// Counters describing engine activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EngineStats {
    /// Features held by the store (0 when unloaded)
    pub features_loaded: usize,
    /// Filter calls that missed the cache and evaluated predicates
    pub filter_evaluations: u64,
    /// Summary calls served
    pub summaries_computed: u64,
    /// Query cache counters
    pub cache: CacheStatsSnapshot,
}

/// Answers building queries over one immutable feature store.
///
/// Construct it once at startup and share it as `Arc<QueryEngine>`. An engine
/// built with [`QueryEngine::unloaded`] fails every query with
/// [`FootprintError::NotLoaded`].
pub struct QueryEngine {
    store: Option<Arc<FeatureStore>>,
    cache: QueryCache,
    filter_evaluations: AtomicU64,
    summaries_computed: AtomicU64,
}

impl QueryEngine {
    /// Creates an engine over `store`.
    pub fn new(store: FeatureStore, cache_config: CacheConfig) -> Self {
        Self::with_shared_store(Arc::new(store), cache_config)
    }

    /// Creates an engine over a store that is shared with other owners.
    pub fn with_shared_store(store: Arc<FeatureStore>, cache_config: CacheConfig) -> Self {
        Self::build(Some(store), cache_config)
    }

    /// Creates an engine without data.
    pub fn unloaded(cache_config: CacheConfig) -> Self {
        Self::build(None, cache_config)
    }

    fn build(store: Option<Arc<FeatureStore>>, cache_config: CacheConfig) -> Self {
        Self {
            store,
            cache: QueryCache::new(cache_config),
            filter_evaluations: AtomicU64::new(0),
            summaries_computed: AtomicU64::new(0),
        }
    }

    /// Loads the GeoJSON file at `path` and creates an engine over it.
    pub fn load(path: impl AsRef<Path>, cache_config: CacheConfig) -> Result<Self> {
        let store = FeatureStore::load(path)?;
        Ok(Self::new(store, cache_config))
    }

    /// Async variant of [`QueryEngine::load`].
    pub async fn load_async(path: impl AsRef<Path>, cache_config: CacheConfig) -> Result<Self> {
        let store = FeatureStore::load_async(path).await?;
        Ok(Self::new(store, cache_config))
    }

    /// Returns true if the engine holds data.
    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the feature store, or `NotLoaded`.
    pub fn store(&self) -> Result<&FeatureStore> {
        self.store.as_deref().ok_or(FootprintError::NotLoaded)
    }

    /// Returns the features matching `query`, in source order.
    ///
    /// Identical queries within the TTL are answered from the cache without
    /// re-evaluating predicates. A malformed bbox fails the call and caches
    /// nothing.
    #[instrument(skip(self, query), fields(key = tracing::field::Empty))]
    pub fn filter_buildings(&self, query: &BuildingQuery) -> Result<Arc<FeatureCollection>> {
        let store = self.store()?;

        let key = query.cache_key();
        tracing::Span::current().record("key", key.as_str());

        if let Some(cached) = self.cache.get(&key) {
            debug!(features = cached.len(), "Cache hit");
            return Ok(cached);
        }

        let bbox = query.parsed_bbox()?;
        let building_type = query.building_type.as_deref();

        self.filter_evaluations.fetch_add(1, Ordering::Relaxed);

        let filtered: FeatureCollection = store
            .all()
            .iter()
            .filter(|feature| matches_all(feature, query.min_height, building_type, bbox.as_ref()))
            .cloned()
            .collect();

        debug!(
            scanned = store.len(),
            matched = filtered.len(),
            "Cache miss, filtered features"
        );

        let filtered = Arc::new(filtered);
        self.cache.set(key, Arc::clone(&filtered));
        Ok(filtered)
    }

    /// Computes summary statistics over every feature. Never cached.
    #[instrument(skip(self))]
    pub fn get_summary(&self) -> Result<SummaryStats> {
        let store = self.store()?;
        self.summaries_computed.fetch_add(1, Ordering::Relaxed);

        let summary = summarize(store.all());
        debug!(
            total = summary.total_buildings,
            types = summary.types.len(),
            "Computed summary"
        );
        Ok(summary)
    }

    /// Removes expired cache entries, returning how many were dropped.
    pub fn expire_stale(&self) -> usize {
        let expired = self.cache.expire_stale();
        if expired > 0 {
            debug!(expired, "Swept expired cache entries");
        }
        expired
    }

    /// Returns the query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Returns activity counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            features_loaded: self.store.as_ref().map_or(0, |store| store.len()),
            filter_evaluations: self.filter_evaluations.load(Ordering::Relaxed),
            summaries_computed: self.summaries_computed.load(Ordering::Relaxed),
            cache: self.cache.stats().snapshot(),
        }
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("loaded", &self.is_loaded())
            .field("features", &self.store.as_ref().map_or(0, |store| store.len()))
            .field("cache", &self.cache)
            .finish()
    }
}
