//! # Footprint Core
//!
//! Core types, errors, and predicates for querying building footprints.
//!
//! This crate provides the foundational building blocks used by all other Footprint crates:
//!
//! - **Types**: GeoJSON features, queries, cache keys, and summary statistics
//! - **Errors**: The failure taxonomy surfaced by the query engine
//! - **Predicates**: Pure per-feature filters for height, type, and bounding box
//! - **Constants**: Cache defaults and format constants
//!
//! ## Example
//!
//! ```rust
//! use footprint_core::{BuildingQuery, Feature, predicates};
//!
//! let feature = Feature::new(vec![vec![13.4, 52.5]], 25.0, "office");
//! let query = BuildingQuery::new().min_height(20.0).bbox("13,52,14,53");
//! let bbox = query.parsed_bbox().unwrap();
//!
//! assert!(predicates::matches_all(&feature, query.min_height, query.building_type.as_deref(), bbox.as_ref()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod predicates;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FootprintError, Result};
pub use types::*;
