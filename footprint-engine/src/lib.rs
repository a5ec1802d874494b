//! # Footprint Engine
//!
//! Answers building queries over an immutable feature store, serving repeated
//! identical queries from a bounded, time-expiring cache.
//!
//! ## Flow
//!
//! 1. The query is normalized into a canonical [`CacheKey`](footprint_core::CacheKey)
//! 2. A live cache entry is returned as-is
//! 3. On a miss the bbox is parsed, every feature is tested against the
//!    height, type and bbox predicates in source order, and the result is cached
//!
//! Summary statistics are computed fresh on every call and never cached.
//!
//! ## Example
//!
//! ```rust,ignore
//! use footprint_engine::{QueryEngine, CacheConfig};
//! use footprint_core::BuildingQuery;
//!
//! let engine = QueryEngine::load("buildings.geojson", CacheConfig::default())?;
//!
//! let tall_offices = engine.filter_buildings(
//!     &BuildingQuery::new().min_height(50.0).building_type("office"),
//! )?;
//! println!("{} matches", tall_offices.len());
//!
//! let summary = engine.get_summary()?;
//! println!("{} buildings", summary.total_buildings);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod engine;
mod summary;

pub use engine::{EngineStats, QueryEngine};
pub use summary::summarize;

pub use footprint_cache::CacheConfig;
