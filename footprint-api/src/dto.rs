//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use footprint_cache::CacheStatsSnapshot;
use footprint_core::types::BuildingQuery;

use crate::error::{ApiError, INVALID_BBOX, INVALID_MIN_HEIGHT};

/// Query string of `GET /buildings`.
///
/// Everything arrives as text so that validation failures produce our own
/// 400 bodies instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingsParams {
    /// Minimum height, inclusive
    pub min_height: Option<String>,
    /// Exact building type
    #[serde(rename = "type")]
    pub building_type: Option<String>,
    /// `minLon,minLat,maxLon,maxLat`
    pub bbox: Option<String>,
}

impl BuildingsParams {
    /// Validates the parameters and builds the engine query.
    pub fn into_query(self) -> Result<BuildingQuery, ApiError> {
        let min_height = self
            .min_height
            .as_deref()
            .map(|raw| parse_min_height(raw).ok_or_else(|| ApiError::bad_request(INVALID_MIN_HEIGHT)))
            .transpose()?;

        let query = BuildingQuery {
            min_height,
            building_type: self.building_type,
            bbox: self.bbox,
        };

        // Reject a bad bbox up front, even if an identical key is cached.
        query
            .parsed_bbox()
            .map_err(|_| ApiError::bad_request(INVALID_BBOX))?;

        Ok(query)
    }
}

/// Blank means zero; anything that is not a number is rejected.
fn parse_min_height(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Features held by the engine
    pub features_loaded: usize,
    /// Query cache counters
    pub cache: CacheStatsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn params(min_height: Option<&str>, bbox: Option<&str>) -> BuildingsParams {
        BuildingsParams {
            min_height: min_height.map(String::from),
            building_type: None,
            bbox: bbox.map(String::from),
        }
    }

    #[test]
    fn test_min_height_parsing() {
        assert_eq!(parse_min_height("12.5"), Some(12.5));
        assert_eq!(parse_min_height(" 7 "), Some(7.0));
        assert_eq!(parse_min_height(""), Some(0.0));
        assert_eq!(parse_min_height("-3"), Some(-3.0));
        assert_eq!(parse_min_height("abc"), None);
        assert_eq!(parse_min_height("NaN"), None);
        assert_eq!(parse_min_height("12m"), None);
    }

    #[test]
    fn test_into_query() {
        let query = params(Some("40"), Some("0,0,1,1")).into_query().unwrap();
        assert_eq!(query.min_height, Some(40.0));
        assert_eq!(query.bbox.as_deref(), Some("0,0,1,1"));
    }

    #[test]
    fn test_into_query_rejects_bad_min_height() {
        let err = params(Some("tall"), None).into_query().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), INVALID_MIN_HEIGHT);
    }

    #[test]
    fn test_into_query_rejects_bad_bbox() {
        for bbox in ["1,2,3", "a,2,3,4", "1,2,3,4,5"] {
            let err = params(None, Some(bbox)).into_query().unwrap_err();
            assert_eq!(err.message(), INVALID_BBOX, "bbox {bbox:?}");
        }
    }

    #[test]
    fn test_empty_bbox_is_accepted() {
        let query = params(None, Some("")).into_query().unwrap();
        assert_eq!(query.bbox.as_deref(), Some(""));
    }
}
