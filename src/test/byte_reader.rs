#[cfg(test)]
mod tests {
    use crate::common::Endianness;
    use crate::error::WkbError;
    use crate::reader::byte_reader::{zigzag_decode, zigzag_encode, ByteReader};

    #[test]
    fn reads_fixed_width_fields() {
        let buf = [0x01u8, 0x02, 0x00, 0x00, 0x00];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_endianness().unwrap(), Endianness::LittleEndian);
        assert_eq!(r.read_u32(Endianness::LittleEndian).unwrap(), 2);
    }

    #[test]
    fn eof_is_reported_with_offset() {
        let buf = [0x01u8];
        let mut r = ByteReader::new(&buf);
        r.read_u8().unwrap();
        match r.read_u32(Endianness::LittleEndian) {
            Err(WkbError::UnexpectedEof { offset, needed }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn uvarint_round_trips_small_values() {
        // 300 = 0b1_0010_1100 -> low7=0101100|cont, next 7=0000010
        let buf = [0xAC, 0x02];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_uvarint().unwrap(), 300);
    }

    #[test]
    fn uvarint_overflows_on_11th_byte() {
        let buf = [0xFFu8; 11];
        let mut r = ByteReader::new(&buf);
        assert!(matches!(r.read_uvarint(), Err(WkbError::VarintOverflow { .. })));
    }

    #[test]
    fn zigzag_preserves_small_magnitudes() {
        assert_eq!(zigzag_decode(0), 0);
        assert_eq!(zigzag_decode(1), -1);
        assert_eq!(zigzag_decode(2), 1);
        assert_eq!(zigzag_decode(3), -2);
        for n in [-1000i64, -1, 0, 1, 1000] {
            assert_eq!(zigzag_decode(zigzag_encode(n)), n);
        }
    }

    #[test]
    fn svarint_decodes_negative_delta() {
        // zigzag(−1000) = 1999 -> varint bytes 0xcf 0x0f (verified against the
        // TWKB polygon test vector in src/test/twkb_reader.rs)
        let buf = [0xcf, 0x0f];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_svarint().unwrap(), -1000);
    }
}
