//! LRU + TTL cache for Footprint query results.
//!
//! Entries are keyed by [`CacheKey`](footprint_core::CacheKey), bounded by
//! entry count with least-recently-used eviction, and expire a fixed TTL after
//! insertion. Expiry is lazy; [`QueryCache::expire_stale`] sweeps on demand.

mod cache;
mod stats;

pub use cache::{CacheConfig, QueryCache};
pub use stats::{CacheStats, CacheStatsSnapshot};
