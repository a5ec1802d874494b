//! Loading the feature store from a GeoJSON file.
//!
//! The file is read once at startup. Read and parse failures both become
//! [`FootprintError::DataLoad`] naming the path; they are not retried.

use std::path::Path;

use tokio::fs;
use tracing::{error, info, instrument};

use footprint_core::error::{FootprintError, Result};

use crate::FeatureStore;

impl FeatureStore {
    /// Loads a GeoJSON feature collection from `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let contents = std::fs::read(path).map_err(|e| load_failed(&source, e))?;
        finish_load(&contents, &source)
    }

    /// Loads a GeoJSON feature collection from `path` without blocking the runtime.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let contents = fs::read(path).await.map_err(|e| load_failed(&source, e))?;
        finish_load(&contents, &source)
    }
}

fn finish_load(contents: &[u8], source: &str) -> Result<FeatureStore> {
    let store = FeatureStore::parse_slice(contents, source).inspect_err(|e| {
        error!(error = %e, "Failed to parse feature collection");
    })?;

    info!(count = store.len(), bytes = contents.len(), "Loaded feature collection");
    Ok(store)
}

fn load_failed(source: &str, err: std::io::Error) -> FootprintError {
    error!(error = %err, "Failed to read feature collection");
    FootprintError::data_load(source, err)
}
