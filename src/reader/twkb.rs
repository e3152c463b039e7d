//! Decoder for the TWKB grammar: a compact, signed-delta, scaled-integer
//! encoding. See the design notes on running-state scoping — it is the
//! subtlest rule in this module: state resets at geometry *type* boundaries
//! for GeometryCollection children but persists across rings within a
//! polygon, across lines within a multilinestring, and across an entire
//! multipolygon.
//!
//! The on-wire type/precision byte packs the base geometry type (1..=7) in
//! its low nibble and the ZigZag-encoded XY precision in its high nibble.
//! TWKB never carries an SRID; a decoded geometry's `srid` is always `None`
//! unless a later reprojection pass assigns one.

use crate::common::GeometryKind;
use crate::error::{WkbError, WkbResult};
use crate::geometry::{Geometry, GeometryValue, Ring, Vertex};
use crate::reader::byte_reader::ByteReader;

const METADATA_BBOX: u8 = 0b0000_0001;
const METADATA_SIZE: u8 = 0b0000_0010;
const METADATA_IDLIST: u8 = 0b0000_0100;
const METADATA_EXT_PRECISION: u8 = 0b0000_1000;
const METADATA_EMPTY: u8 = 0b0001_0000;

/// Running per-dimension accumulator used to reconstruct absolute
/// coordinates from successive deltas. Scoped per §4.3: shared across rings
/// of one polygon, across lines of one multilinestring, across an entire
/// multipolygon; reset at the start of each GeometryCollection child.
#[derive(Clone, Copy, Default)]
struct RunningState {
    x: f64,
    y: f64,
    z: f64,
    m: f64,
}

struct Header {
    kind: GeometryKind,
    scale_xy: f64,
    has_z: bool,
    has_m: bool,
    scale_z: f64,
    scale_m: f64,
    has_bbox: bool,
    has_idlist: bool,
    is_empty: bool,
}

fn pow10(exp: i32) -> f64 {
    10f64.powi(exp)
}

fn read_header(r: &mut ByteReader) -> WkbResult<Header> {
    let type_and_precision = r.read_u8()?;
    let type_code = (type_and_precision & 0x0f) as u32;
    let kind = GeometryKind::from_code(type_code).ok_or(WkbError::UnknownGeometryType(type_code))?;
    let precision_zigzag = ((type_and_precision & 0xf0) >> 4) as u64;
    let precision_xy = crate::reader::byte_reader::zigzag_decode(precision_zigzag) as i32;
    let scale_xy = pow10(precision_xy);

    let metadata = r.read_u8()?;
    let has_bbox = metadata & METADATA_BBOX != 0;
    let has_size = metadata & METADATA_SIZE != 0;
    let has_idlist = metadata & METADATA_IDLIST != 0;
    let has_ext_precision = metadata & METADATA_EXT_PRECISION != 0;
    let is_empty = metadata & METADATA_EMPTY != 0;

    let (has_z, has_m, scale_z, scale_m) = if has_ext_precision {
        let ext = r.read_u8()?;
        let has_z = ext & 0b001 != 0;
        let has_m = ext & 0b010 != 0;
        let prec_z = ((ext & 0b0001_1100) >> 2) as i32;
        let prec_m = ((ext & 0b1110_0000) >> 5) as i32;
        (has_z, has_m, pow10(prec_z), pow10(prec_m))
    } else {
        (false, false, 1.0, 1.0)
    };

    if has_size {
        // The decoder may use this to bound reads; we only need to consume it.
        r.read_uvarint()?;
    }

    if has_bbox {
        let dims = 2 + has_z as usize + has_m as usize;
        for _ in 0..(2 * dims) {
            r.read_svarint()?;
        }
    }

    Ok(Header {
        kind,
        scale_xy,
        has_z,
        has_m,
        scale_z,
        scale_m,
        has_bbox,
        has_idlist,
        is_empty,
    })
}

fn read_delta_vertex(r: &mut ByteReader, header: &Header, state: &mut RunningState) -> WkbResult<Vertex> {
    state.x += r.read_svarint()? as f64 / header.scale_xy;
    state.y += r.read_svarint()? as f64 / header.scale_xy;
    let z = if header.has_z {
        state.z += r.read_svarint()? as f64 / header.scale_z;
        Some(state.z)
    } else {
        None
    };
    let m = if header.has_m {
        state.m += r.read_svarint()? as f64 / header.scale_m;
        Some(state.m)
    } else {
        None
    };
    Ok(Vertex { x: state.x, y: state.y, z, m })
}

fn read_id_list(r: &mut ByteReader, n: u64) -> WkbResult<()> {
    for _ in 0..n {
        r.read_svarint()?;
    }
    Ok(())
}

fn min_point_size(header: &Header) -> usize {
    1 + header.has_z as usize + header.has_m as usize
}

fn capped_capacity(remaining_bytes: usize, n: u64, min_element_size: usize) -> usize {
    let max_by_bytes = remaining_bytes / min_element_size.max(1);
    (n as usize).min(max_by_bytes)
}

/// Decode a full TWKB message into a [`Geometry`]. The result never carries
/// an SRID.
pub fn decode_twkb(buf: &[u8]) -> WkbResult<Geometry> {
    let mut r = ByteReader::new(buf);
    decode_message(&mut r)
}

fn decode_message(r: &mut ByteReader) -> WkbResult<Geometry> {
    let header = read_header(r)?;

    let value = if header.is_empty {
        empty_value(header.kind)
    } else {
        let mut state = RunningState::default();
        match header.kind {
            GeometryKind::Point => GeometryValue::Point(read_delta_vertex(r, &header, &mut state)?),
            GeometryKind::LineString => {
                GeometryValue::LineString(read_point_list(r, &header, &mut state)?)
            }
            GeometryKind::Polygon => GeometryValue::Polygon(read_rings(r, &header, &mut state)?),
            GeometryKind::MultiPoint => {
                let n = r.read_uvarint()?;
                if header.has_idlist {
                    read_id_list(r, n)?;
                }
                let cap = capped_capacity(r.remaining(), n, min_point_size(&header));
                let mut points = Vec::with_capacity(cap);
                for _ in 0..n {
                    points.push(read_delta_vertex(r, &header, &mut state)?);
                }
                GeometryValue::MultiPoint(points)
            }
            GeometryKind::MultiLineString => {
                let n = r.read_uvarint()?;
                if header.has_idlist {
                    read_id_list(r, n)?;
                }
                let cap = capped_capacity(r.remaining(), n, 1);
                let mut lines = Vec::with_capacity(cap);
                for _ in 0..n {
                    lines.push(read_point_list(r, &header, &mut state)?);
                }
                GeometryValue::MultiLineString(lines)
            }
            GeometryKind::MultiPolygon => {
                let n = r.read_uvarint()?;
                if header.has_idlist {
                    read_id_list(r, n)?;
                }
                let cap = capped_capacity(r.remaining(), n, 1);
                let mut polys = Vec::with_capacity(cap);
                for _ in 0..n {
                    polys.push(read_rings(r, &header, &mut state)?);
                }
                GeometryValue::MultiPolygon(polys)
            }
            GeometryKind::GeometryCollection => {
                let n = r.read_uvarint()?;
                if header.has_idlist {
                    read_id_list(r, n)?;
                }
                let cap = capped_capacity(r.remaining(), n, 2);
                let mut geoms = Vec::with_capacity(cap);
                for _ in 0..n {
                    // Independent running state per child: a fresh decode_message call.
                    geoms.push(decode_message(r)?);
                }
                GeometryValue::GeometryCollection(geoms)
            }
        }
    };

    let _ = header.has_bbox; // consumed above, not retained
    Ok(Geometry::new(value, header.has_z, header.has_m, None))
}

/// Read a `u_varint n` followed by `n` delta-coded vertices, sharing `state`
/// with the caller (used for a standalone LineString, and for each line of a
/// MultiLineString where state persists across lines).
fn read_point_list(r: &mut ByteReader, header: &Header, state: &mut RunningState) -> WkbResult<Vec<Vertex>> {
    let n = r.read_uvarint()?;
    let cap = capped_capacity(r.remaining(), n, min_point_size(header));
    let mut points = Vec::with_capacity(cap);
    for _ in 0..n {
        points.push(read_delta_vertex(r, header, state)?);
    }
    Ok(points)
}

/// Read `u_varint n_rings` then, for each ring, `u_varint n_points` and its
/// points; `state` is shared across every ring of one polygon (and, for a
/// MultiPolygon, across every ring of every polygon).
fn read_rings(r: &mut ByteReader, header: &Header, state: &mut RunningState) -> WkbResult<Vec<Ring>> {
    let n_rings = r.read_uvarint()?;
    let cap = capped_capacity(r.remaining(), n_rings, 1);
    let mut rings = Vec::with_capacity(cap);
    for _ in 0..n_rings {
        rings.push(read_point_list(r, header, state)?);
    }
    Ok(rings)
}

fn empty_value(kind: GeometryKind) -> GeometryValue {
    match kind {
        GeometryKind::Point => GeometryValue::Point(Vertex { x: f64::NAN, y: f64::NAN, z: None, m: None }),
        GeometryKind::LineString => GeometryValue::LineString(Vec::new()),
        GeometryKind::Polygon => GeometryValue::Polygon(Vec::new()),
        GeometryKind::MultiPoint => GeometryValue::MultiPoint(Vec::new()),
        GeometryKind::MultiLineString => GeometryValue::MultiLineString(Vec::new()),
        GeometryKind::MultiPolygon => GeometryValue::MultiPolygon(Vec::new()),
        GeometryKind::GeometryCollection => GeometryValue::GeometryCollection(Vec::new()),
    }
}
