#[cfg(test)]
mod tests {
    use crate::error::WkbError;
    use crate::geometry::GeometryValue;
    use crate::reader::decode_ewkb;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn decodes_point_z() {
        let buf = hex("0101000080000000000000F03F00000000000000400000000000001040");
        let geom = decode_ewkb(&buf).unwrap();
        assert!(geom.has_z && !geom.has_m);
        assert_eq!(geom.srid, None);
        match geom.value {
            GeometryValue::Point(v) => {
                assert_eq!((v.x, v.y, v.z), (1.0, 2.0, Some(4.0)));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn decodes_polygon_with_srid() {
        let buf = hex("01030000a0e610000001000000070000003333333333f33840295c8fc2f5284e400000000000000840ae47e17a14ee384048e17a14ae274e4000000000000008403333333333f3384048e17a14ae274e4000000000000008407b14ae47e1fa384048e17a14ae274e4000000000000008403d0ad7a370fd3840295c8fc2f5284e4000000000000008407b14ae47e1fa38400ad7a3703d2a4e4000000000000008403333333333f33840295c8fc2f5284e400000000000000840");
        let geom = decode_ewkb(&buf).unwrap();
        assert_eq!(geom.srid, Some(4326));
        match geom.value {
            GeometryValue::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 7);
                let first = rings[0][0];
                assert!((first.x - 24.95).abs() < 1e-9);
                assert!((first.y - 60.32).abs() < 1e-9);
                assert_eq!(first.z, Some(3.0));
            }
            other => panic!("expected Polygon, got {other:?}"),
        }
    }

    #[test]
    fn sub_geometry_type_mismatch_is_rejected() {
        // MultiPoint header claiming one element, but that element is framed
        // as a LineString.
        let mut buf = hex("010400000001000000"); // MultiPoint, srid-less, n=1
        buf.extend(hex("010200000000000000")); // LineString, n=0
        let err = decode_ewkb(&buf).unwrap_err();
        assert!(matches!(err, WkbError::UnexpectedSubGeometry { .. }));
    }

    #[test]
    fn truncated_buffer_is_unexpected_eof() {
        let buf = hex("0101000080000000000000F03F");
        let err = decode_ewkb(&buf).unwrap_err();
        assert!(matches!(err, WkbError::UnexpectedEof { .. }));
    }

    #[test]
    fn claimed_huge_ring_count_does_not_blow_up_allocation() {
        // 40-byte message claiming 2^31 rings in a Polygon.
        let mut buf = hex("0103000000"); // Polygon, LE
        buf.extend((u32::MAX / 2).to_le_bytes());
        let err = decode_ewkb(&buf).unwrap_err();
        // Runs out of input well before it could honor the claimed count.
        assert!(matches!(err, WkbError::UnexpectedEof { .. }));
    }
}
