#[cfg(test)]
mod tests {
    use crate::error::WkbError;
    use crate::geometry::{Geometry, GeometryValue, Vertex};
    use crate::reproject::{reproject, TransformerCache};
    use approx::assert_abs_diff_eq;

    #[test]
    fn point_4326_to_3857_matches_test_vector() {
        let geom = Geometry::new(GeometryValue::Point(Vertex::xyz(1.0, 2.0, 4.0)), true, false, Some(4326));
        let cache = TransformerCache::default();
        let out = reproject(&geom, &cache, 4326, 3857).unwrap();
        assert_eq!(out.srid, Some(3857));
        match out.value {
            GeometryValue::Point(v) => {
                assert_abs_diff_eq!(v.x, 111319.491, epsilon = 1e-3);
                assert_abs_diff_eq!(v.y, 222684.209, epsilon = 1e-3);
                assert_abs_diff_eq!(v.z.unwrap(), 4.0, epsilon = 1e-3);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn identity_reprojection_preserves_coordinates() {
        let geom = Geometry::new(GeometryValue::Point(Vertex::xy(24.95, 60.32)), false, false, Some(4326));
        let cache = TransformerCache::default();
        let out = reproject(&geom, &cache, 4326, 4326).unwrap();
        match out.value {
            GeometryValue::Point(v) => {
                assert_abs_diff_eq!(v.x, 24.95, epsilon = 1e-9);
                assert_abs_diff_eq!(v.y, 60.32, epsilon = 1e-9);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_4326_3857_4326_recovers_original() {
        let geom = Geometry::new(GeometryValue::Point(Vertex::xy(24.95, 60.32)), false, false, Some(4326));
        let cache = TransformerCache::default();
        let merc = reproject(&geom, &cache, 4326, 3857).unwrap();
        let back = reproject(&merc, &cache, 3857, 4326).unwrap();
        match back.value {
            GeometryValue::Point(v) => {
                assert_abs_diff_eq!(v.x, 24.95, epsilon = 1e-3);
                assert_abs_diff_eq!(v.y, 60.32, epsilon = 1e-3);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_latitude_is_reprojection_failed() {
        let geom = Geometry::new(GeometryValue::Point(Vertex::xy(0.0, 95.0)), false, false, Some(4326));
        let cache = TransformerCache::default();
        let err = reproject(&geom, &cache, 4326, 3857).unwrap_err();
        assert!(matches!(err, WkbError::ReprojectionFailed { .. }));
    }

    #[test]
    fn unresolvable_srid_without_proj_feature_is_unknown_srid() {
        let geom = Geometry::new(GeometryValue::Point(Vertex::xy(0.0, 0.0)), false, false, Some(1));
        let cache = TransformerCache::default();
        #[cfg(not(feature = "proj"))]
        {
            let err = reproject(&geom, &cache, 1, 2).unwrap_err();
            assert!(matches!(err, WkbError::UnknownSrid(_)));
        }
        #[cfg(feature = "proj")]
        {
            let _ = reproject(&geom, &cache, 1, 2);
        }
    }
}
