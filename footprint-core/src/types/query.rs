//! Query parameters, bounding boxes and cache keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::BBOX_COMPONENTS;
use crate::error::{FootprintError, Result};

/// Filter parameters for a building query. Absent fields do not filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingQuery {
    /// Minimum height (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    /// Exact, case-sensitive building type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    /// Raw `minLon,minLat,maxLon,maxLat` string, parsed on cache miss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
}

impl BuildingQuery {
    /// Creates an empty query that matches every feature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum height.
    pub fn min_height(mut self, min_height: f64) -> Self {
        self.min_height = Some(min_height);
        self
    }

    /// Sets the building type.
    pub fn building_type(mut self, building_type: impl Into<String>) -> Self {
        self.building_type = Some(building_type.into());
        self
    }

    /// Sets the raw bbox string.
    pub fn bbox(mut self, bbox: impl Into<String>) -> Self {
        self.bbox = Some(bbox.into());
        self
    }

    /// Derives the cache key for this query.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_query(self)
    }

    /// Parses the bbox parameter, if present.
    ///
    /// An empty bbox string counts as absent.
    pub fn parsed_bbox(&self) -> Result<Option<BBox>> {
        match self.bbox.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

/// Axis-aligned bounding box in longitude/latitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl BBox {
    /// Creates a bounding box from its edges.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Returns true if the point lies inside the closed box.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

impl FromStr for BBox {
    type Err = FootprintError;

    /// Parses `minLon,minLat,maxLon,maxLat`.
    ///
    /// A blank component reads as `0`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FootprintError::InvalidBBox(s.to_string());

        let parts = s
            .split(',')
            .map(|part| match part.trim() {
                "" => Ok(0.0),
                part => part
                    .parse::<f64>()
                    .ok()
                    .filter(|value| !value.is_nan())
                    .ok_or_else(invalid),
            })
            .collect::<Result<Vec<f64>>>()?;

        if parts.len() != BBOX_COMPONENTS {
            return Err(invalid());
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

/// Canonical cache key of a [`BuildingQuery`].
///
/// Fields are written in the fixed order `minHeight`, `type`, `bbox`. Absent
/// fields are written as `-`; strings are quoted and escaped so no two
/// distinct queries share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    canonical: String,
}

impl CacheKey {
    /// Builds the key for a query.
    pub fn from_query(query: &BuildingQuery) -> Self {
        // -0 and 0 are the same bound.
        let min_height = query
            .min_height
            .map(|h| (h + 0.0).to_string())
            .unwrap_or_else(|| "-".into());

        Self {
            canonical: format!(
                "minHeight={}|type={}|bbox={}",
                min_height,
                quoted(query.building_type.as_deref()),
                quoted(query.bbox.as_deref()),
            ),
        }
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

fn quoted(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("{:?}", s),
        None => "-".into(),
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl From<&BuildingQuery> for CacheKey {
    fn from(query: &BuildingQuery) -> Self {
        Self::from_query(query)
    }
}
