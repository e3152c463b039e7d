//! Decoder for the PostGIS EWKB grammar.
//!
//! ```text
//! byte  endian_flag                      (0 = BE, 1 = LE)
//! u32   type_word  (endian-dependent)
//! [u32  srid]        (present iff SRID_FLAG set)
//! body  (per geometry type)
//! ```

use crate::common::{Dimension, Endianness, GeometryKind, EWKB_FLAG_M, EWKB_FLAG_SRID, EWKB_FLAG_Z, EWKB_TYPE_MASK};
use crate::error::{WkbError, WkbResult};
use crate::geometry::{Geometry, GeometryValue, Ring, Vertex};
use crate::reader::byte_reader::ByteReader;

/// Decode a full EWKB message into a [`Geometry`].
pub fn decode_ewkb(buf: &[u8]) -> WkbResult<Geometry> {
    let mut r = ByteReader::new(buf);
    decode_message(&mut r, None, None, true)
}

/// Decode one framed message (own endian flag + type word). `outer_dims`, when
/// set, is the `(has_z, has_m)` of the containing geometry and must match.
/// `expected_kind` constrains the base type for strict containers (MultiXxx);
/// `None` means any base type is accepted (GeometryCollection, or top level).
fn decode_message(
    r: &mut ByteReader,
    outer_dims: Option<(bool, bool)>,
    expected_kind: Option<GeometryKind>,
    is_outer: bool,
) -> WkbResult<Geometry> {
    let endianness = r.read_endianness()?;
    let type_word = r.read_u32(endianness)?;

    let has_z = type_word & EWKB_FLAG_Z != 0;
    let has_m = type_word & EWKB_FLAG_M != 0;
    let has_srid = type_word & EWKB_FLAG_SRID != 0;
    let base_code = type_word & EWKB_TYPE_MASK;

    let kind = GeometryKind::from_code(base_code).ok_or(WkbError::UnknownGeometryType(type_word))?;

    if let Some(expected) = expected_kind {
        if kind != expected {
            return Err(WkbError::UnexpectedSubGeometry {
                expected: format!("{expected:?}"),
                found: format!("{kind:?}"),
            });
        }
    }

    if let Some((outer_z, outer_m)) = outer_dims {
        if outer_z != has_z || outer_m != has_m {
            return Err(WkbError::InconsistentDimensions {
                outer_z,
                outer_m,
                nested_z: has_z,
                nested_m: has_m,
            });
        }
    }

    // A sub-geometry MUST NOT carry SRID_FLAG; if it does, the outer SRID
    // wins and these bytes are simply consumed.
    let srid_field = if has_srid { Some(r.read_u32(endianness)?) } else { None };

    let dim = Dimension::from_flags(has_z, has_m);
    let dims = (has_z, has_m);

    let value = match kind {
        GeometryKind::Point => GeometryValue::Point(read_vertex(r, endianness, dim)?),
        GeometryKind::LineString => GeometryValue::LineString(read_vertices(r, endianness, dim)?),
        GeometryKind::Polygon => GeometryValue::Polygon(read_rings(r, endianness, dim)?),
        GeometryKind::MultiPoint => {
            let n = r.read_u32(endianness)? as u64;
            let cap = capped_capacity(r.remaining(), n, min_sub_message_size(dim));
            let mut points = Vec::with_capacity(cap);
            for _ in 0..n {
                let geom = decode_message(r, Some(dims), Some(GeometryKind::Point), false)?;
                match geom.value {
                    GeometryValue::Point(v) => points.push(v),
                    _ => unreachable!("decode_message enforced Point kind"),
                }
            }
            GeometryValue::MultiPoint(points)
        }
        GeometryKind::MultiLineString => {
            let n = r.read_u32(endianness)? as u64;
            let cap = capped_capacity(r.remaining(), n, min_sub_message_size(dim));
            let mut lines = Vec::with_capacity(cap);
            for _ in 0..n {
                let geom = decode_message(r, Some(dims), Some(GeometryKind::LineString), false)?;
                match geom.value {
                    GeometryValue::LineString(vs) => lines.push(vs),
                    _ => unreachable!("decode_message enforced LineString kind"),
                }
            }
            GeometryValue::MultiLineString(lines)
        }
        GeometryKind::MultiPolygon => {
            let n = r.read_u32(endianness)? as u64;
            let cap = capped_capacity(r.remaining(), n, min_sub_message_size(dim));
            let mut polys = Vec::with_capacity(cap);
            for _ in 0..n {
                let geom = decode_message(r, Some(dims), Some(GeometryKind::Polygon), false)?;
                match geom.value {
                    GeometryValue::Polygon(rings) => polys.push(rings),
                    _ => unreachable!("decode_message enforced Polygon kind"),
                }
            }
            GeometryValue::MultiPolygon(polys)
        }
        GeometryKind::GeometryCollection => {
            let n = r.read_u32(endianness)? as u64;
            let cap = capped_capacity(r.remaining(), n, min_sub_message_size(dim));
            let mut geoms = Vec::with_capacity(cap);
            for _ in 0..n {
                geoms.push(decode_message(r, Some(dims), None, false)?);
            }
            GeometryValue::GeometryCollection(geoms)
        }
    };

    let srid = if is_outer { srid_field } else { None };
    Ok(Geometry::new(value, has_z, has_m, srid))
}

fn read_vertex(r: &mut ByteReader, e: Endianness, dim: Dimension) -> WkbResult<Vertex> {
    let x = r.read_f64(e)?;
    let y = r.read_f64(e)?;
    let z = if dim.has_z() { Some(r.read_f64(e)?) } else { None };
    let m = if dim.has_m() { Some(r.read_f64(e)?) } else { None };
    Ok(Vertex { x, y, z, m })
}

fn read_vertices(r: &mut ByteReader, e: Endianness, dim: Dimension) -> WkbResult<Vec<Vertex>> {
    let n = r.read_u32(e)? as u64;
    let cap = capped_capacity(r.remaining(), n, dim.size() * 8);
    let mut out = Vec::with_capacity(cap);
    for _ in 0..n {
        out.push(read_vertex(r, e, dim)?);
    }
    Ok(out)
}

fn read_rings(r: &mut ByteReader, e: Endianness, dim: Dimension) -> WkbResult<Vec<Ring>> {
    let n_rings = r.read_u32(e)? as u64;
    // A ring's smallest on-wire form is its 4-byte point count.
    let cap = capped_capacity(r.remaining(), n_rings, 4);
    let mut rings = Vec::with_capacity(cap);
    for _ in 0..n_rings {
        rings.push(read_vertices(r, e, dim)?);
    }
    Ok(rings)
}

/// The smallest possible on-wire size of a framed sub-message at this
/// dimensionality: endian flag + type word + one Point's worth of ordinates.
fn min_sub_message_size(dim: Dimension) -> usize {
    1 + 4 + dim.size() * 8
}

/// Cap a claimed element count by what the remaining bytes could possibly
/// hold, so a corrupt `n` can't drive an allocation disproportionate to the
/// input (e.g. a claimed ring count of 2^31 on a 40-byte message).
fn capped_capacity(remaining_bytes: usize, n: u64, min_element_size: usize) -> usize {
    let max_by_bytes = remaining_bytes / min_element_size.max(1);
    (n as usize).min(max_by_bytes)
}
