//! Encoder for the PostGIS EWKB grammar. Always emits little-endian; the
//! dual of [`crate::reader::decode_ewkb`].

use crate::common::{Endianness, GeometryKind, EWKB_FLAG_M, EWKB_FLAG_SRID, EWKB_FLAG_Z};
use crate::geometry::{Geometry, GeometryValue, Ring, Vertex};

/// Encode a [`Geometry`] as an EWKB byte buffer. SRID and flags of the
/// outermost message come from `geom`; nested sub-geometries never carry
/// SRID_FLAG, matching the decoder's contract.
pub fn encode_ewkb(geom: &Geometry) -> Vec<u8> {
    let mut buf = Vec::new();
    write_message(&mut buf, geom, true);
    buf
}

fn write_message(buf: &mut Vec<u8>, geom: &Geometry, is_outer: bool) {
    let srid = if is_outer { geom.srid } else { None };
    write_header(buf, geom.kind(), geom.has_z, geom.has_m, srid);

    match &geom.value {
        GeometryValue::Point(v) => write_vertex(buf, v, geom.has_z, geom.has_m),
        GeometryValue::LineString(vs) => write_vertices(buf, vs, geom.has_z, geom.has_m),
        GeometryValue::Polygon(rings) => write_rings(buf, rings, geom.has_z, geom.has_m),
        GeometryValue::MultiPoint(points) => {
            buf.extend_from_slice(&(points.len() as u32).to_le_bytes());
            for v in points {
                write_header(buf, GeometryKind::Point, geom.has_z, geom.has_m, None);
                write_vertex(buf, v, geom.has_z, geom.has_m);
            }
        }
        GeometryValue::MultiLineString(lines) => {
            buf.extend_from_slice(&(lines.len() as u32).to_le_bytes());
            for line in lines {
                write_header(buf, GeometryKind::LineString, geom.has_z, geom.has_m, None);
                write_vertices(buf, line, geom.has_z, geom.has_m);
            }
        }
        GeometryValue::MultiPolygon(polys) => {
            buf.extend_from_slice(&(polys.len() as u32).to_le_bytes());
            for rings in polys {
                write_header(buf, GeometryKind::Polygon, geom.has_z, geom.has_m, None);
                write_rings(buf, rings, geom.has_z, geom.has_m);
            }
        }
        GeometryValue::GeometryCollection(children) => {
            buf.extend_from_slice(&(children.len() as u32).to_le_bytes());
            for child in children {
                write_message(buf, child, false);
            }
        }
    }
}

fn write_header(buf: &mut Vec<u8>, kind: GeometryKind, has_z: bool, has_m: bool, srid: Option<u32>) {
    buf.push(Endianness::LittleEndian.into());
    let mut type_word = kind as u32;
    if has_z {
        type_word |= EWKB_FLAG_Z;
    }
    if has_m {
        type_word |= EWKB_FLAG_M;
    }
    if srid.is_some() {
        type_word |= EWKB_FLAG_SRID;
    }
    buf.extend_from_slice(&type_word.to_le_bytes());
    if let Some(srid) = srid {
        buf.extend_from_slice(&srid.to_le_bytes());
    }
}

fn write_vertex(buf: &mut Vec<u8>, v: &Vertex, has_z: bool, has_m: bool) {
    buf.extend_from_slice(&v.x.to_le_bytes());
    buf.extend_from_slice(&v.y.to_le_bytes());
    if has_z {
        buf.extend_from_slice(&v.z.unwrap_or(0.0).to_le_bytes());
    }
    if has_m {
        buf.extend_from_slice(&v.m.unwrap_or(0.0).to_le_bytes());
    }
}

fn write_vertices(buf: &mut Vec<u8>, vs: &[Vertex], has_z: bool, has_m: bool) {
    buf.extend_from_slice(&(vs.len() as u32).to_le_bytes());
    for v in vs {
        write_vertex(buf, v, has_z, has_m);
    }
}

fn write_rings(buf: &mut Vec<u8>, rings: &[Ring], has_z: bool, has_m: bool) {
    buf.extend_from_slice(&(rings.len() as u32).to_le_bytes());
    for ring in rings {
        write_vertices(buf, ring, has_z, has_m);
    }
}
