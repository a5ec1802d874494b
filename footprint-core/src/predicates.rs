//! Per-feature filter predicates.
//!
//! Every predicate is total and treats an absent parameter as "no filter".
//! A feature belongs to a filtered result iff [`matches_all`] holds.

use crate::types::{BBox, Feature};

/// True iff `min_height` is absent or the feature is at least that tall.
pub fn matches_min_height(feature: &Feature, min_height: Option<f64>) -> bool {
    match min_height {
        Some(min) => feature.height() >= min,
        None => true,
    }
}

/// True iff `building_type` is absent or empty, or equals the feature's type exactly.
pub fn matches_type(feature: &Feature, building_type: Option<&str>) -> bool {
    match building_type {
        Some(t) if !t.is_empty() => feature.building_type() == t,
        _ => true,
    }
}

/// True iff `bbox` is absent or any vertex of the outer ring lies in the box.
///
/// This is a vertex-containment test, not a polygon intersection: a ring that
/// crosses the box without a vertex inside it does not match. Positions with
/// fewer than two components are skipped.
pub fn matches_bbox(feature: &Feature, bbox: Option<&BBox>) -> bool {
    let Some(bbox) = bbox else {
        return true;
    };

    feature.geometry.outer_ring().is_some_and(|ring| {
        ring.iter().any(|position| match position.as_slice() {
            [lon, lat, ..] => match (lon.as_f64(), lat.as_f64()) {
                (Some(lon), Some(lat)) => bbox.contains(lon, lat),
                _ => false,
            },
            _ => false,
        })
    })
}

/// Logical AND of all three predicates.
pub fn matches_all(
    feature: &Feature,
    min_height: Option<f64>,
    building_type: Option<&str>,
    bbox: Option<&BBox>,
) -> bool {
    matches_min_height(feature, min_height)
        && matches_type(feature, building_type)
        && matches_bbox(feature, bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ring, Geometry};
    use proptest::prelude::*;
    use test_case::test_case;

    fn square(min_lon: f64, min_lat: f64, size: f64) -> Vec<Vec<f64>> {
        vec![
            vec![min_lon, min_lat],
            vec![min_lon + size, min_lat],
            vec![min_lon + size, min_lat + size],
            vec![min_lon, min_lat + size],
            vec![min_lon, min_lat],
        ]
    }

    #[test_case(None, true ; "absent")]
    #[test_case(Some(10.0), true ; "equal is inclusive")]
    #[test_case(Some(9.5), true ; "below")]
    #[test_case(Some(10.5), false ; "above")]
    #[test_case(Some(f64::NAN), false ; "nan never matches")]
    fn test_min_height(min_height: Option<f64>, expected: bool) {
        let feature = Feature::new(square(0.0, 0.0, 1.0), 10.0, "office");
        assert_eq!(matches_min_height(&feature, min_height), expected);
    }

    #[test_case(None, true ; "absent")]
    #[test_case(Some(""), true ; "empty is absent")]
    #[test_case(Some("office"), true ; "exact")]
    #[test_case(Some("Office"), false ; "case sensitive")]
    #[test_case(Some("offic"), false ; "prefix")]
    fn test_type(building_type: Option<&str>, expected: bool) {
        let feature = Feature::new(square(0.0, 0.0, 1.0), 10.0, "office");
        assert_eq!(matches_type(&feature, building_type), expected);
    }

    #[test]
    fn test_bbox_absent_matches() {
        let feature = Feature::new(square(50.0, 50.0, 1.0), 1.0, "a");
        assert!(matches_bbox(&feature, None));
    }

    #[test]
    fn test_bbox_vertex_inside() {
        let feature = Feature::new(square(0.5, 0.5, 1.0), 1.0, "a");
        assert!(matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_vertex_on_edge() {
        let feature = Feature::new(square(1.0, 1.0, 1.0), 1.0, "a");
        assert!(matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_all_vertices_outside() {
        let feature = Feature::new(square(2.0, 2.0, 1.0), 1.0, "a");
        assert!(!matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_crossing_without_vertex_inside_is_excluded() {
        // A large square fully enclosing the box: overlaps it but has no vertex in it.
        let feature = Feature::new(square(-1.0, -1.0, 3.0), 1.0, "a");
        assert!(!matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_only_outer_ring_is_tested() {
        let mut feature = Feature::new(square(5.0, 5.0, 1.0), 1.0, "a");
        feature.geometry.coordinates.push(ring(square(0.2, 0.2, 0.1)));
        assert!(!matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_without_rings_never_matches() {
        let mut feature = Feature::new(vec![], 1.0, "a");
        feature.geometry = Geometry::new(vec![]);
        assert!(!matches_bbox(&feature, Some(&BBox::new(-180.0, -90.0, 180.0, 90.0))));
    }

    #[test]
    fn test_bbox_uses_first_two_components() {
        let feature = Feature::new(vec![vec![0.5, 0.5, 120.0], vec![7.0]], 1.0, "a");
        assert!(matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 1.0, 1.0))));
    }

    #[test]
    fn test_bbox_with_integer_coordinates() {
        let feature: Feature = serde_json::from_str(
            r#"{"geometry":{"coordinates":[[[3,4],[5,4],[5,6],[3,4]]]},"properties":{"height":7,"type":"a"}}"#,
        )
        .unwrap();

        assert!(matches_bbox(&feature, Some(&BBox::new(4.5, 5.5, 6.0, 7.0))));
        assert!(!matches_bbox(&feature, Some(&BBox::new(0.0, 0.0, 2.0, 2.0))));
        assert!(matches_min_height(&feature, Some(7.0)));
    }

    #[test]
    fn test_matches_all_is_conjunction() {
        let feature = Feature::new(square(0.5, 0.5, 1.0), 10.0, "office");
        let bbox = BBox::new(0.0, 0.0, 1.0, 1.0);

        assert!(matches_all(&feature, Some(5.0), Some("office"), Some(&bbox)));
        assert!(!matches_all(&feature, Some(50.0), Some("office"), Some(&bbox)));
        assert!(!matches_all(&feature, Some(5.0), Some("shed"), Some(&bbox)));
        assert!(!matches_all(&feature, Some(5.0), Some("office"), Some(&BBox::new(9.0, 9.0, 10.0, 10.0))));
        assert!(matches_all(&feature, None, None, None));
    }

    proptest! {
        #[test]
        fn prop_min_height_matches_comparison(height in -500.0f64..500.0, min in -500.0f64..500.0) {
            let feature = Feature::new(vec![], height, "a");
            prop_assert_eq!(matches_min_height(&feature, Some(min)), height >= min);
        }

        #[test]
        fn prop_bbox_matches_iff_some_vertex_inside(
            ring in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 0..8),
            (a, b, c, d) in (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
        ) {
            let bbox = BBox::new(a.min(c), b.min(d), a.max(c), b.max(d));
            let expected = ring.iter().any(|&(lon, lat)| {
                bbox.min_lon <= lon && lon <= bbox.max_lon && bbox.min_lat <= lat && lat <= bbox.max_lat
            });
            let feature = Feature::new(ring.iter().map(|&(lon, lat)| vec![lon, lat]).collect(), 1.0, "a");
            prop_assert_eq!(matches_bbox(&feature, Some(&bbox)), expected);
        }
    }
}
