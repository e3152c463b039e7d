#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod common;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod reader;
pub mod reproject;
#[cfg(test)]
mod test;
pub mod writer;

pub use common::{Dimension, Endianness, GeometryKind};
pub use error::{WkbError, WkbResult};
pub use geometry::{Geometry, GeometryValue, Vertex};

use reproject::TransformerCache;
use serde_json::Value;
use std::sync::OnceLock;

fn default_transformer_cache() -> &'static TransformerCache {
    static CACHE: OnceLock<TransformerCache> = OnceLock::new();
    CACHE.get_or_init(TransformerCache::default)
}

/// Decode an EWKB message and marshal it to GeoJSON.
///
/// If both `from_srid` and `to_srid` are given, the result is reprojected.
/// If only `to_srid` is given, the geometry's own embedded SRID (if any) is
/// used as the source; [`WkbError::MissingSourceSrid`] if neither is
/// available. If neither override is given, no reprojection occurs and the
/// output carries whatever SRID the message itself embedded.
pub fn ewkb_to_geojson(bytes: &[u8], from_srid: Option<u32>, to_srid: Option<u32>) -> WkbResult<Value> {
    let geom = reader::decode_ewkb(bytes)?;
    let geom = maybe_reproject(geom, from_srid, to_srid)?;
    Ok(geojson::geometry_to_geojson(&geom))
}

/// Decode a TWKB message and marshal it to GeoJSON. TWKB never embeds an
/// SRID, so `from_srid` must be supplied for reprojection to happen.
pub fn twkb_to_geojson(bytes: &[u8], from_srid: Option<u32>, to_srid: Option<u32>) -> WkbResult<Value> {
    let geom = reader::decode_twkb(bytes)?;
    let geom = maybe_reproject(geom, from_srid, to_srid)?;
    Ok(geojson::geometry_to_geojson(&geom))
}

/// Parse a GeoJSON value (optionally carrying a `"crs"` key) and encode it
/// as little-endian EWKB bytes.
pub fn geojson_to_ewkb(value: &Value) -> WkbResult<Vec<u8>> {
    let geom = geojson::geojson_to_geometry(value)?;
    Ok(writer::encode_ewkb(&geom))
}

/// Reproject a GeoJSON value in place, returning a new value with
/// transformed coordinates and `"crs"` set to `to_srid`. `from_srid`, if
/// omitted, falls back to the input's own `"crs"` key.
pub fn reproject_geojson(value: &Value, from_srid: Option<u32>, to_srid: u32) -> WkbResult<Value> {
    let geom = geojson::geojson_to_geometry(value)?;
    let from_srid = from_srid.or(geom.srid).ok_or(WkbError::MissingSourceSrid)?;
    let reprojected = reproject::reproject(&geom, default_transformer_cache(), from_srid, to_srid)?;
    Ok(geojson::geometry_to_geojson(&reprojected))
}

fn maybe_reproject(geom: Geometry, from_srid: Option<u32>, to_srid: Option<u32>) -> WkbResult<Geometry> {
    let Some(to_srid) = to_srid else {
        return Ok(geom);
    };
    let from_srid = from_srid.or(geom.srid).ok_or(WkbError::MissingSourceSrid)?;
    reproject::reproject(&geom, default_transformer_cache(), from_srid, to_srid)
}
