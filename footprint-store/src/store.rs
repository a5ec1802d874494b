//! In-memory feature store.

use std::io::Read;

use tracing::debug;

use footprint_core::error::{FootprintError, Result};
use footprint_core::types::{Feature, FeatureCollection};

/// Name recorded for stores that were not loaded from a file.
const IN_MEMORY_SOURCE: &str = "<memory>";

/// Immutable holder of the loaded feature collection.
///
/// Reads need no synchronization: nothing can mutate the collection after
/// construction, so a `FeatureStore` is shared behind an `Arc` as-is.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    /// The loaded collection
    collection: FeatureCollection,
    /// Where the collection came from (file path or `<memory>`)
    source: String,
}

impl FeatureStore {
    /// Wraps an already-built collection.
    pub fn from_collection(collection: FeatureCollection) -> Self {
        Self::with_source(collection, IN_MEMORY_SOURCE)
    }

    pub(crate) fn with_source(collection: FeatureCollection, source: impl Into<String>) -> Self {
        let source = source.into();
        debug!(source = %source, features = collection.len(), "Feature store ready");
        Self { collection, source }
    }

    /// Parses a serialized feature collection from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::parse_slice(bytes, IN_MEMORY_SOURCE)
    }

    /// Parses a serialized feature collection from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_reader(reader)
            .map_err(|e| FootprintError::data_load(IN_MEMORY_SOURCE, e))?;
        Ok(Self::from_collection(collection))
    }

    pub(crate) fn parse_slice(bytes: &[u8], source: &str) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_slice(bytes).map_err(|e| FootprintError::data_load(source, e))?;
        Ok(Self::with_source(collection, source))
    }

    /// Returns all features in source order.
    pub fn all(&self) -> &[Feature] {
        &self.collection.features
    }

    /// Returns the whole collection.
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Returns where the collection was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the number of features.
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Returns true if the store holds no features.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

impl From<FeatureCollection> for FeatureStore {
    fn from(collection: FeatureCollection) -> Self {
        Self::from_collection(collection)
    }
}
