//! GeoJSON marshalling: a [`Geometry`] to/from a loosely-shaped
//! [`serde_json::Value`] tree, with a non-standard top-level `"crs"` key
//! carrying the SRID.

use serde_json::{json, Map, Value};

use crate::common::Dimension;
use crate::error::{WkbError, WkbResult};
use crate::geometry::{Geometry, GeometryValue, Ring, Vertex};

/// Marshal a [`Geometry`] into its canonical GeoJSON value tree. If `srid` is
/// set, a `"crs"` key carrying the bare SRID number is added alongside
/// `"type"`/`"coordinates"` (or `"geometries"` for a collection).
pub fn geometry_to_geojson(geom: &Geometry) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(type_name(geom)));
    match &geom.value {
        GeometryValue::GeometryCollection(children) => {
            let geometries: Vec<Value> = children.iter().map(geometry_to_geojson_nested).collect();
            obj.insert("geometries".to_string(), Value::Array(geometries));
        }
        _ => {
            obj.insert("coordinates".to_string(), coordinates_value(geom));
        }
    }
    if let Some(srid) = geom.srid {
        obj.insert("crs".to_string(), json!(srid));
    }
    Value::Object(obj)
}

/// Same as [`geometry_to_geojson`] but never adds a `"crs"` key: nested
/// children of a GeometryCollection never carry their own SRID.
fn geometry_to_geojson_nested(geom: &Geometry) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(type_name(geom)));
    match &geom.value {
        GeometryValue::GeometryCollection(children) => {
            let geometries: Vec<Value> = children.iter().map(geometry_to_geojson_nested).collect();
            obj.insert("geometries".to_string(), Value::Array(geometries));
        }
        _ => {
            obj.insert("coordinates".to_string(), coordinates_value(geom));
        }
    }
    Value::Object(obj)
}

fn type_name(geom: &Geometry) -> &'static str {
    use crate::common::GeometryKind as K;
    match geom.kind() {
        K::Point => "Point",
        K::LineString => "LineString",
        K::Polygon => "Polygon",
        K::MultiPoint => "MultiPoint",
        K::MultiLineString => "MultiLineString",
        K::MultiPolygon => "MultiPolygon",
        K::GeometryCollection => "GeometryCollection",
    }
}

fn coordinates_value(geom: &Geometry) -> Value {
    match &geom.value {
        GeometryValue::Point(v) => vertex_value(v),
        GeometryValue::LineString(vs) | GeometryValue::MultiPoint(vs) => vertices_value(vs),
        GeometryValue::Polygon(rings) => rings_value(rings),
        GeometryValue::MultiLineString(lines) => Value::Array(lines.iter().map(|l| vertices_value(l)).collect()),
        GeometryValue::MultiPolygon(polys) => Value::Array(polys.iter().map(|p| rings_value(p)).collect()),
        GeometryValue::GeometryCollection(_) => Value::Null,
    }
}

fn vertex_value(v: &Vertex) -> Value {
    let mut coords = vec![json!(v.x), json!(v.y)];
    if let Some(z) = v.z {
        coords.push(json!(z));
    }
    if let Some(m) = v.m {
        coords.push(json!(m));
    }
    Value::Array(coords)
}

fn vertices_value(vs: &[Vertex]) -> Value {
    Value::Array(vs.iter().map(vertex_value).collect())
}

fn rings_value(rings: &[Ring]) -> Value {
    Value::Array(rings.iter().map(|r| vertices_value(r)).collect())
}

/// Parse a GeoJSON value tree back into a [`Geometry`]. Dimensionality is
/// inferred from the ordinate count of the first vertex encountered (2 → XY,
/// 3 → XYZ, 4 → XYZM); a `"crs"` key, if present, populates the SRID.
pub fn geojson_to_geometry(value: &Value) -> WkbResult<Geometry> {
    let obj = value.as_object().ok_or_else(|| WkbError::InvalidGeoJson("expected a JSON object".to_string()))?;
    let type_name = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| WkbError::InvalidGeoJson("missing \"type\"".to_string()))?;
    let srid = obj.get("crs").and_then(Value::as_u64).map(|n| n as u32);

    let (value, dim) = parse_value(type_name, obj)?;
    Ok(Geometry::new(value, dim.has_z(), dim.has_m(), srid))
}

fn parse_value(type_name: &str, obj: &Map<String, Value>) -> WkbResult<(GeometryValue, Dimension)> {
    if type_name == "GeometryCollection" {
        let geometries = obj
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| WkbError::InvalidGeoJson("GeometryCollection missing \"geometries\"".to_string()))?;
        let mut children = Vec::with_capacity(geometries.len());
        let mut dim: Option<Dimension> = None;
        for child in geometries {
            let geom = geojson_to_geometry(child)?;
            let d = geom.dimension();
            match dim {
                None => dim = Some(d),
                Some(expected) if expected != d => return Err(mismatched_dims()),
                _ => {}
            }
            children.push(geom);
        }
        return Ok((GeometryValue::GeometryCollection(children), dim.unwrap_or(Dimension::Xy)));
    }

    let coordinates = obj
        .get("coordinates")
        .ok_or_else(|| WkbError::InvalidGeoJson("missing \"coordinates\"".to_string()))?;

    match type_name {
        "Point" => {
            let (v, dim) = parse_vertex(coordinates)?;
            Ok((GeometryValue::Point(v), dim))
        }
        "LineString" | "MultiPoint" => {
            let (vs, dim) = parse_vertices(coordinates)?;
            let value = if type_name == "LineString" { GeometryValue::LineString(vs) } else { GeometryValue::MultiPoint(vs) };
            Ok((value, dim))
        }
        "Polygon" => {
            let (rings, dim) = parse_rings(coordinates)?;
            Ok((GeometryValue::Polygon(rings), dim))
        }
        "MultiLineString" => {
            let arr = coordinates.as_array().ok_or_else(invalid_coords)?;
            let mut lines = Vec::with_capacity(arr.len());
            let mut dim: Option<Dimension> = None;
            for line in arr {
                let (vs, d) = parse_vertices(line)?;
                match dim {
                    None => dim = Some(d),
                    Some(expected) if expected != d => return Err(mismatched_dims()),
                    _ => {}
                }
                lines.push(vs);
            }
            Ok((GeometryValue::MultiLineString(lines), dim.unwrap_or(Dimension::Xy)))
        }
        "MultiPolygon" => {
            let arr = coordinates.as_array().ok_or_else(invalid_coords)?;
            let mut polys = Vec::with_capacity(arr.len());
            let mut dim: Option<Dimension> = None;
            for poly in arr {
                let (rings, d) = parse_rings(poly)?;
                match dim {
                    None => dim = Some(d),
                    Some(expected) if expected != d => return Err(mismatched_dims()),
                    _ => {}
                }
                polys.push(rings);
            }
            Ok((GeometryValue::MultiPolygon(polys), dim.unwrap_or(Dimension::Xy)))
        }
        other => Err(WkbError::InvalidGeoJson(format!("unknown geometry type \"{other}\""))),
    }
}

fn invalid_coords() -> WkbError {
    WkbError::InvalidGeoJson("\"coordinates\" has the wrong shape for this type".to_string())
}

/// Every vertex of a geometry (and, for a GeometryCollection, every child)
/// must carry the same ordinate count; see the §3 dimensionality invariant.
fn mismatched_dims() -> WkbError {
    WkbError::InvalidGeoJson("vertices do not all share the same dimensionality (z/m)".to_string())
}

fn parse_vertex(value: &Value) -> WkbResult<(Vertex, Dimension)> {
    let arr = value.as_array().ok_or_else(invalid_coords)?;
    let nums: Vec<f64> = arr
        .iter()
        .map(|v| v.as_f64().ok_or_else(invalid_coords))
        .collect::<WkbResult<_>>()?;
    match nums.as_slice() {
        [x, y] => Ok((Vertex::xy(*x, *y), Dimension::Xy)),
        [x, y, z] => Ok((Vertex::xyz(*x, *y, *z), Dimension::Xyz)),
        [x, y, z, m] => Ok((Vertex::xyzm(*x, *y, *z, *m), Dimension::Xyzm)),
        _ => Err(invalid_coords()),
    }
}

fn parse_vertices(value: &Value) -> WkbResult<(Vec<Vertex>, Dimension)> {
    let arr = value.as_array().ok_or_else(invalid_coords)?;
    let mut out = Vec::with_capacity(arr.len());
    let mut dim: Option<Dimension> = None;
    for item in arr {
        let (v, d) = parse_vertex(item)?;
        match dim {
            None => dim = Some(d),
            Some(expected) if expected != d => return Err(mismatched_dims()),
            _ => {}
        }
        out.push(v);
    }
    Ok((out, dim.unwrap_or(Dimension::Xy)))
}

fn parse_rings(value: &Value) -> WkbResult<(Vec<Ring>, Dimension)> {
    let arr = value.as_array().ok_or_else(invalid_coords)?;
    let mut rings = Vec::with_capacity(arr.len());
    let mut dim: Option<Dimension> = None;
    for ring in arr {
        let (vs, d) = parse_vertices(ring)?;
        match dim {
            None => dim = Some(d),
            Some(expected) if expected != d => return Err(mismatched_dims()),
            _ => {}
        }
        rings.push(vs);
    }
    Ok((rings, dim.unwrap_or(Dimension::Xy)))
}
