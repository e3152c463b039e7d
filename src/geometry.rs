//! The in-memory geometry model shared by every codec in this crate.
//!
//! A [`Geometry`] is a tagged sum type, not an inheritance hierarchy: each
//! variant owns exactly the payload the OGC/EWKB grammar describes for it.
//! This is the representation decoders produce, the [`crate::reproject`] pass
//! rewrites in place, and the GeoJSON marshaller / EWKB encoder consume.

/// A single coordinate tuple. Every vertex of a given [`Geometry`] carries the
/// same combination of `z`/`m` (see [`Geometry::dimension`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl Vertex {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None, m: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z), m: None }
    }

    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self { x, y, z: None, m: Some(m) }
    }

    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z: Some(z), m: Some(m) }
    }
}

/// An ordered sequence of vertices bounding a polygon face. Rings are
/// tolerated closed or unclosed on decode; nothing in this crate normalizes
/// them (see the Open Questions in the design notes).
pub type Ring = Vec<Vertex>;

/// The canonical geometry value produced by the EWKB/TWKB decoders and
/// consumed by the GeoJSON marshaller, the reprojection pass, and the EWKB
/// encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryValue {
    Point(Vertex),
    LineString(Vec<Vertex>),
    Polygon(Vec<Ring>),
    MultiPoint(Vec<Vertex>),
    MultiLineString(Vec<Vec<Vertex>>),
    MultiPolygon(Vec<Vec<Ring>>),
    GeometryCollection(Vec<Geometry>),
}

/// A geometry value together with its dimensionality and an optional SRID.
///
/// Only the outermost geometry of a decoded message carries the SRID; nested
/// sub-geometries inherit it implicitly and are never re-tagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub value: GeometryValue,
    pub has_z: bool,
    pub has_m: bool,
    pub srid: Option<u32>,
}

impl Geometry {
    pub fn new(value: GeometryValue, has_z: bool, has_m: bool, srid: Option<u32>) -> Self {
        Self { value, has_z, has_m, srid }
    }

    pub fn dimension(&self) -> crate::common::Dimension {
        crate::common::Dimension::from_flags(self.has_z, self.has_m)
    }

    /// The base type code (1..=7) of this geometry's value, independent of
    /// dimension and SRID.
    pub fn kind(&self) -> crate::common::GeometryKind {
        use crate::common::GeometryKind as K;
        match &self.value {
            GeometryValue::Point(_) => K::Point,
            GeometryValue::LineString(_) => K::LineString,
            GeometryValue::Polygon(_) => K::Polygon,
            GeometryValue::MultiPoint(_) => K::MultiPoint,
            GeometryValue::MultiLineString(_) => K::MultiLineString,
            GeometryValue::MultiPolygon(_) => K::MultiPolygon,
            GeometryValue::GeometryCollection(_) => K::GeometryCollection,
        }
    }

    /// Apply `f` to every vertex's ordinates in traversal order, in place.
    /// Used by the reprojection pass; topology (counts, nesting, ring order)
    /// is never touched.
    pub fn for_each_vertex_mut(&mut self, f: &mut impl FnMut(&mut Vertex)) {
        fn walk(value: &mut GeometryValue, f: &mut impl FnMut(&mut Vertex)) {
            match value {
                GeometryValue::Point(v) => f(v),
                GeometryValue::LineString(vs) | GeometryValue::MultiPoint(vs) => {
                    vs.iter_mut().for_each(|v| f(v))
                }
                GeometryValue::Polygon(rings) => {
                    rings.iter_mut().flatten().for_each(|v| f(v))
                }
                GeometryValue::MultiLineString(lines) => {
                    lines.iter_mut().flatten().for_each(|v| f(v))
                }
                GeometryValue::MultiPolygon(polys) => {
                    polys.iter_mut().flatten().flatten().for_each(|v| f(v))
                }
                GeometryValue::GeometryCollection(geoms) => {
                    geoms.iter_mut().for_each(|g| walk(&mut g.value, f))
                }
            }
        }
        walk(&mut self.value, f)
    }
}
