//! Aggregate statistics over the loaded features.

use std::collections::BTreeMap;

use serde::Serialize;

/// Min/max/average height.
///
/// Over zero features these hold `+∞`, `−∞` and `NaN`; JSON renders all three
/// as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeightStats {
    /// Lowest height seen
    pub min: f64,
    /// Highest height seen
    pub max: f64,
    /// Sum of heights divided by feature count
    pub avg: f64,
}

/// Summary of the whole feature store.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of features
    pub total_buildings: usize,
    /// Feature count per building type
    pub types: BTreeMap<String, usize>,
    /// Height statistics
    pub height_stats: HeightStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_json_shape() {
        let summary = SummaryStats {
            total_buildings: 3,
            types: BTreeMap::from([("a".to_string(), 2), ("b".to_string(), 1)]),
            height_stats: HeightStats {
                min: 10.0,
                max: 30.0,
                avg: 20.0,
            },
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "totalBuildings": 3,
                "types": { "a": 2, "b": 1 },
                "heightStats": { "min": 10.0, "max": 30.0, "avg": 20.0 }
            })
        );
    }

    #[test]
    fn test_non_finite_stats_serialize_as_null() {
        let summary = SummaryStats {
            total_buildings: 0,
            types: BTreeMap::new(),
            height_stats: HeightStats {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
                avg: f64::NAN,
            },
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["heightStats"]["min"].is_null());
        assert!(value["heightStats"]["max"].is_null());
        assert!(value["heightStats"]["avg"].is_null());
    }
}
