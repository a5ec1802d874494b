//! # Footprint Store
//!
//! Immutable in-memory holder of the building feature collection.
//!
//! The collection is loaded exactly once, from a GeoJSON file or an in-memory
//! source, and is read-only afterwards. Any read or parse failure surfaces as
//! [`FootprintError::DataLoad`](footprint_core::FootprintError::DataLoad).
//!
//! ## Example
//!
//! ```rust,ignore
//! use footprint_store::FeatureStore;
//!
//! let store = FeatureStore::load("buildings.geojson")?;
//! for feature in store.all() {
//!     println!("{} m", feature.height());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod file;
mod store;

pub use store::FeatureStore;
