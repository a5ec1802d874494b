//! Domain types for Footprint.
//!
//! - [`Feature`]: one building footprint with geometry and properties
//! - [`FeatureCollection`]: ordered features plus the type discriminator
//! - [`BuildingQuery`], [`BBox`], [`CacheKey`]: query parameters and their canonical key
//! - [`SummaryStats`]: aggregate statistics over the store

mod feature;
mod query;
mod summary;

pub use feature::*;
pub use query::*;
pub use summary::*;
