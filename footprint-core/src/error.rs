//! Error types for Footprint.
//!
//! One variant per failure a caller can observe from the query engine. The
//! loader folds I/O and JSON failures into [`FootprintError::DataLoad`].

use thiserror::Error;

/// Result type alias using `FootprintError`.
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Main error type for all Footprint operations.
#[derive(Debug, Error)]
pub enum FootprintError {
    // ═══════════════════════════════════════════════════════════════════════════
    // DATA ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The feature collection could not be read or parsed.
    #[error("Failed to load '{source_name}': {reason}")]
    DataLoad { source_name: String, reason: String },

    /// A query was issued against an engine that holds no data.
    #[error("GeoJSON data not loaded")]
    NotLoaded,

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The bbox parameter is malformed.
    #[error("Invalid bbox '{0}'. Expected format: minLon,minLat,maxLon,maxLat")]
    InvalidBBox(String),
}

impl FootprintError {
    /// Builds a [`FootprintError::DataLoad`] for the named source.
    pub fn data_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        FootprintError::DataLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the caller can fix this by resubmitting a corrected query.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FootprintError::InvalidBBox(_))
    }

    /// Returns true if the process cannot serve queries until data is reloaded.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FootprintError::DataLoad { .. } | FootprintError::NotLoaded)
    }
}
