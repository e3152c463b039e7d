//! Error and Result types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WkbError {
    #[error("unexpected end of input at offset {offset}, needed {needed} more byte(s)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("malformed varint at offset {offset}")]
    VarintOverflow { offset: usize },

    #[error("unknown endian flag `{0}`, expected 0 (big-endian) or 1 (little-endian)")]
    UnknownEndianFlag(u8),

    #[error("unknown geometry type code `{0}`")]
    UnknownGeometryType(u32),

    #[error("nested geometry dimensions (z={nested_z}, m={nested_m}) disagree with the outer geometry (z={outer_z}, m={outer_m})")]
    InconsistentDimensions {
        outer_z: bool,
        outer_m: bool,
        nested_z: bool,
        nested_m: bool,
    },

    #[error("expected a `{expected}` sub-geometry but found `{found}`")]
    UnexpectedSubGeometry { expected: String, found: String },

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("unknown SRID `{0}`")]
    UnknownSrid(u32),

    #[error("reprojection requested but no source SRID was given or embedded in the geometry")]
    MissingSourceSrid,

    #[error("reprojection failed for coordinate ({x}, {y}): {reason}")]
    ReprojectionFailed { x: f64, y: f64, reason: String },
}

pub type WkbResult<T> = std::result::Result<T, WkbError>;
