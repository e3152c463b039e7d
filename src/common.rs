//! Shared constants and small value types used by both the EWKB and TWKB
//! codecs.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bit flag for EWKB geometries carrying a Z ordinate.
pub(crate) const EWKB_FLAG_Z: u32 = 0x8000_0000;
/// Bit flag for EWKB geometries carrying an M ordinate.
pub(crate) const EWKB_FLAG_M: u32 = 0x4000_0000;
/// Bit flag for EWKB geometries carrying an embedded SRID.
pub(crate) const EWKB_FLAG_SRID: u32 = 0x2000_0000;
/// Mask isolating the base geometry type code (1..=7) from the type word.
pub(crate) const EWKB_TYPE_MASK: u32 = 0x0000_00ff;

/// Byte order of a WKB/EWKB message, encoded as the leading flag byte
/// (`0` = big-endian, `1` = little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Endianness {
    BigEndian = 0,
    #[default]
    LittleEndian = 1,
}

/// Vertex dimensionality shared by every vertex of a [`crate::geometry::Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    /// Number of f64 ordinates per vertex for this dimensionality.
    pub fn size(&self) -> usize {
        match self {
            Self::Xy => 2,
            Self::Xyz | Self::Xym => 3,
            Self::Xyzm => 4,
        }
    }

    pub(crate) fn has_z(&self) -> bool {
        matches!(self, Self::Xyz | Self::Xyzm)
    }

    pub(crate) fn has_m(&self) -> bool {
        matches!(self, Self::Xym | Self::Xyzm)
    }

    pub(crate) fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (true, true) => Self::Xyzm,
            (true, false) => Self::Xyz,
            (false, true) => Self::Xym,
            (false, false) => Self::Xy,
        }
    }
}

/// The seven base geometry type codes shared by EWKB and TWKB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryKind {
    pub(crate) fn from_code(code: u32) -> Option<Self> {
        let kind = match code {
            1 => Self::Point,
            2 => Self::LineString,
            3 => Self::Polygon,
            4 => Self::MultiPoint,
            5 => Self::MultiLineString,
            6 => Self::MultiPolygon,
            7 => Self::GeometryCollection,
            _ => return None,
        };
        Some(kind)
    }
}
