//! A cursor over an immutable byte buffer with the primitive reads shared by
//! the EWKB and TWKB decoders: fixed-width integers and floats in a
//! caller-chosen endianness, plus LEB128-style varints.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::common::Endianness;
use crate::error::{WkbError, WkbResult};

/// Maximum number of continuation bytes a varint may spend before we give up;
/// 10 groups of 7 bits cover every `u64`.
const MAX_VARINT_BYTES: usize = 10;

/// Read-only cursor over a caller-owned byte slice. Never retains the buffer
/// beyond the lifetime of the decode call that constructed it.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> WkbResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(WkbError::UnexpectedEof { offset: self.pos, needed: n - self.remaining() });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read one byte. This is how every EWKB message begins: the endianness
    /// flag (0 = big-endian, 1 = little-endian).
    pub fn read_u8(&mut self) -> WkbResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_endianness(&mut self) -> WkbResult<Endianness> {
        let flag = self.read_u8()?;
        Endianness::try_from(flag).map_err(|_| WkbError::UnknownEndianFlag(flag))
    }

    pub fn read_u32(&mut self, endianness: Endianness) -> WkbResult<u32> {
        let bytes = self.take(4)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_u32(bytes),
            Endianness::LittleEndian => LittleEndian::read_u32(bytes),
        })
    }

    pub fn read_f64(&mut self, endianness: Endianness) -> WkbResult<f64> {
        let bytes = self.take(8)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_f64(bytes),
            Endianness::LittleEndian => LittleEndian::read_f64(bytes),
        })
    }

    /// Read an unsigned LEB128 varint: up to 10 groups of 7 bits,
    /// little-endian group order, high bit of each byte signals continuation.
    pub fn read_uvarint(&mut self) -> WkbResult<u64> {
        let start = self.pos;
        let mut result: u64 = 0;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_u8()?;
            let group = (byte & 0x7f) as u64;
            if i == 9 && group > 1 {
                // A 10th group can only ever contribute its lowest bit
                // without overflowing 64 bits.
                return Err(WkbError::VarintOverflow { offset: start });
            }
            result |= group << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(WkbError::VarintOverflow { offset: start })
    }

    /// Read a ZigZag-encoded signed varint: `(n >> 1) ^ -(n & 1)`.
    pub fn read_svarint(&mut self) -> WkbResult<i64> {
        let raw = self.read_uvarint()?;
        Ok(zigzag_decode(raw))
    }
}

pub(crate) fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

pub(crate) fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}
