//! Aggregate statistics over a feature slice.

use std::collections::BTreeMap;

use footprint_core::types::{Feature, HeightStats, SummaryStats};

/// Computes counts per type and height statistics in a single pass.
///
/// Over an empty slice `min` stays `+∞`, `max` stays `−∞` and `avg` is
/// `0.0 / 0.0`, i.e. `NaN`.
pub fn summarize(features: &[Feature]) -> SummaryStats {
    let mut types: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_height = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for feature in features {
        *types.entry(feature.building_type().to_string()).or_insert(0) += 1;

        let height = feature.height();
        total_height += height;
        min = min.min(height);
        max = max.max(height);
    }

    SummaryStats {
        total_buildings: features.len(),
        types,
        height_stats: HeightStats {
            min,
            max,
            avg: total_height / features.len() as f64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(height: f64, building_type: &str) -> Feature {
        Feature::new(vec![vec![0.0, 0.0]], height, building_type)
    }

    #[test]
    fn test_summary_aggregation() {
        let features = vec![building(10.0, "a"), building(20.0, "a"), building(30.0, "b")];
        let summary = summarize(&features);

        assert_eq!(summary.total_buildings, 3);
        assert_eq!(summary.types.get("a"), Some(&2));
        assert_eq!(summary.types.get("b"), Some(&1));
        assert_eq!(summary.height_stats.min, 10.0);
        assert_eq!(summary.height_stats.max, 30.0);
        assert_eq!(summary.height_stats.avg, 20.0);
    }

    #[test]
    fn test_summary_single_feature() {
        let summary = summarize(&[building(7.5, "shed")]);
        assert_eq!(summary.height_stats.min, 7.5);
        assert_eq!(summary.height_stats.max, 7.5);
        assert_eq!(summary.height_stats.avg, 7.5);
    }

    #[test]
    fn test_summary_empty_keeps_sentinels() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_buildings, 0);
        assert!(summary.types.is_empty());
        assert_eq!(summary.height_stats.min, f64::INFINITY);
        assert_eq!(summary.height_stats.max, f64::NEG_INFINITY);
        assert!(summary.height_stats.avg.is_nan());
    }
}
