#[cfg(test)]
mod tests {
    use crate::reader::decode_ewkb;
    use crate::writer::encode_ewkb;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn point_z_round_trips_byte_exact() {
        let buf = hex("0101000080000000000000F03F00000000000000400000000000001040");
        let geom = decode_ewkb(&buf).unwrap();
        let re = encode_ewkb(&geom);
        assert_eq!(to_hex(&re), to_hex(&buf).to_lowercase());
    }

    #[test]
    fn polygon_with_srid_round_trips_byte_exact() {
        let buf = hex("01030000a0e610000001000000070000003333333333f33840295c8fc2f5284e400000000000000840ae47e17a14ee384048e17a14ae274e4000000000000008403333333333f3384048e17a14ae274e4000000000000008407b14ae47e1fa384048e17a14ae274e4000000000000008403d0ad7a370fd3840295c8fc2f5284e4000000000000008407b14ae47e1fa38400ad7a3703d2a4e4000000000000008403333333333f33840295c8fc2f5284e400000000000000840");
        let geom = decode_ewkb(&buf).unwrap();
        let re = encode_ewkb(&geom);
        assert_eq!(to_hex(&re), to_hex(&buf));
    }

    #[test]
    fn multipolygon_round_trips_byte_exact() {
        let buf = hex("01060000800100000001030000800100000004000000a01a2fdd1e67114191ed7cff238f5941000000000000000052b81e0517671141931804ce228f594100000000000000009cc420b0036711417b14ae1f238f59410000000000000000a01a2fdd1e67114191ed7cff238f59410000000000000000");
        let geom = decode_ewkb(&buf).unwrap();
        let re = encode_ewkb(&geom);
        assert_eq!(to_hex(&re), to_hex(&buf));
    }
}
