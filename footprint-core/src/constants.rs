//! Constants shared across the Footprint crates.

// ═══════════════════════════════════════════════════════════════════════════════
// GEOJSON
// ═══════════════════════════════════════════════════════════════════════════════

/// Type discriminator of a GeoJSON feature collection.
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

/// Number of comma-separated components in a bbox parameter.
pub const BBOX_COMPONENTS: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// QUERY CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of cached query results.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Lifetime of a cached query result, measured from insertion.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// DATA SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// File name the server loads when no data path is configured.
pub const DEFAULT_DATA_FILE: &str = "buildings.geojson";
