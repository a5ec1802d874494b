//! GeoJSON feature types for building footprints.
//!
//! Only the members the engine reads are typed. Everything else a source
//! feature carries (ids, geometry type, extra properties) is kept in the
//! flattened `extra` maps and written back out unchanged. Heights and
//! coordinates are held as JSON numbers so `10` is written back as `10`.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::constants::FEATURE_COLLECTION_TYPE;

/// A coordinate position: longitude, latitude and optionally altitude.
pub type Position = Vec<Number>;

/// A closed sequence of positions.
pub type Ring = Vec<Position>;

/// Footprint geometry as a sequence of rings. The first ring is the outline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Polygon rings, outer ring first
    pub coordinates: Vec<Ring>,
    /// Remaining geometry members (e.g. `"type": "Polygon"`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Geometry {
    /// Creates a geometry from its rings.
    pub fn new(coordinates: Vec<Ring>) -> Self {
        Self {
            coordinates,
            extra: Map::new(),
        }
    }

    /// Returns the outer ring, if any.
    pub fn outer_ring(&self) -> Option<&Ring> {
        self.coordinates.first()
    }
}

/// Builds a ring from plain `[lon, lat, ..]` positions.
///
/// JSON has no encoding for NaN or infinities; such components become `0`.
pub fn ring(positions: Vec<Vec<f64>>) -> Ring {
    positions
        .into_iter()
        .map(|position| position.into_iter().map(number).collect())
        .collect()
}

fn number(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0))
}

/// Building attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingProperties {
    /// Building height, as written in the source
    pub height: Number,
    /// Building type, e.g. "residential"
    #[serde(rename = "type")]
    pub building_type: String,
    /// Remaining properties
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One building footprint record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Footprint geometry
    pub geometry: Geometry,
    /// Building attributes
    pub properties: BuildingProperties,
    /// Remaining feature members (e.g. `"type": "Feature"`, `"id"`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with the given outline, height and type.
    pub fn new(outline: Vec<Vec<f64>>, height: f64, building_type: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("type".into(), Value::String("Feature".into()));

        Self {
            geometry: Geometry::new(vec![ring(outline)]),
            properties: BuildingProperties {
                height: number(height),
                building_type: building_type.into(),
                extra: Map::new(),
            },
            extra,
        }
    }

    /// Building height.
    pub fn height(&self) -> f64 {
        self.properties.height.as_f64().unwrap_or(f64::NAN)
    }

    /// Building type.
    pub fn building_type(&self) -> &str {
        &self.properties.building_type
    }
}

/// An ordered set of features plus the `"FeatureCollection"` discriminator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`; any other value fails to deserialize
    #[serde(
        rename = "type",
        default = "feature_collection_type",
        deserialize_with = "collection_type"
    )]
    pub kind: String,
    /// Features in source order
    pub features: Vec<Feature>,
}

fn feature_collection_type() -> String {
    FEATURE_COLLECTION_TYPE.to_string()
}

fn collection_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let kind = String::deserialize(deserializer)?;
    if kind == FEATURE_COLLECTION_TYPE {
        Ok(kind)
    } else {
        Err(D::Error::invalid_value(Unexpected::Str(&kind), &FEATURE_COLLECTION_TYPE))
    }
}

impl FeatureCollection {
    /// Wraps features into a collection.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: feature_collection_type(),
            features,
        }
    }

    /// Returns the number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
