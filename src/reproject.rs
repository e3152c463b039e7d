//! Coordinate reprojection: walks a [`Geometry`] tree and replaces every
//! vertex's (X, Y[, Z]) through an injected [`CoordTransformer`], batching all
//! coordinates of one vertex array into a single transformer call.
//!
//! Two transformers ship built in: an identity (`from == to`) and a
//! closed-form spherical Web Mercator pair for EPSG:4326 ↔ EPSG:3857, the
//! pair actually exercised by the test vectors. Anything else falls back to
//! a PROJ-backed transformer when the `proj` feature is enabled.

use std::collections::VecDeque;
use std::f64::consts::PI;
use std::sync::Mutex;

use crate::error::{WkbError, WkbResult};
use crate::geometry::Geometry;

const EARTH_RADIUS_M: f64 = 6378137.0;

/// A batched coordinate transformer for one `(from_srid, to_srid)` pair.
///
/// Implementations transform 2D arrays in place; the default `transform_3d`
/// delegates to `transform_2d` and leaves Z untouched, matching a transformer
/// that is only 2D-capable. A 3D-capable transformer overrides it.
pub trait CoordTransformer: Send + Sync {
    fn transform_2d(&self, xs: &mut [f64], ys: &mut [f64]) -> WkbResult<()>;

    fn transform_3d(&self, xs: &mut [f64], ys: &mut [f64], _zs: &mut [f64]) -> WkbResult<()> {
        self.transform_2d(xs, ys)
    }
}

struct IdentityTransformer;

impl CoordTransformer for IdentityTransformer {
    fn transform_2d(&self, _xs: &mut [f64], _ys: &mut [f64]) -> WkbResult<()> {
        Ok(())
    }
}

enum MercatorDirection {
    LonLatToMercator,
    MercatorToLonLat,
}

struct WebMercatorTransformer {
    direction: MercatorDirection,
}

impl CoordTransformer for WebMercatorTransformer {
    fn transform_2d(&self, xs: &mut [f64], ys: &mut [f64]) -> WkbResult<()> {
        for (x, y) in xs.iter_mut().zip(ys.iter_mut()) {
            let (nx, ny) = match self.direction {
                MercatorDirection::LonLatToMercator => {
                    if !(-90.0..=90.0).contains(y) {
                        return Err(WkbError::ReprojectionFailed {
                            x: *x,
                            y: *y,
                            reason: "latitude out of range for Web Mercator".to_string(),
                        });
                    }
                    lonlat_to_merc(*x, *y)
                }
                MercatorDirection::MercatorToLonLat => merc_to_lonlat(*x, *y),
            };
            *x = nx;
            *y = ny;
        }
        Ok(())
    }
}

fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * ((PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI * 0.5).to_degrees();
    (lon, lat)
}

#[cfg(feature = "proj")]
mod proj_backend {
    use super::CoordTransformer;
    use crate::error::{WkbError, WkbResult};
    use proj::Proj;
    use std::sync::Mutex;

    pub struct ProjTransformer(Mutex<Proj>);

    impl ProjTransformer {
        pub fn new(from_srid: u32, to_srid: u32) -> WkbResult<Self> {
            let from = format!("EPSG:{from_srid}");
            let to = format!("EPSG:{to_srid}");
            let proj = Proj::new_known_crs(&from, &to, None)
                .map_err(|_| WkbError::UnknownSrid(to_srid))?;
            Ok(Self(Mutex::new(proj)))
        }
    }

    impl CoordTransformer for ProjTransformer {
        fn transform_2d(&self, xs: &mut [f64], ys: &mut [f64]) -> WkbResult<()> {
            let proj = self.0.lock().expect("proj transformer mutex poisoned");
            for (x, y) in xs.iter_mut().zip(ys.iter_mut()) {
                let (nx, ny) = proj.convert((*x, *y)).map_err(|e| WkbError::ReprojectionFailed {
                    x: *x,
                    y: *y,
                    reason: e.to_string(),
                })?;
                *x = nx;
                *y = ny;
            }
            Ok(())
        }
    }
}

fn build_transformer(from_srid: u32, to_srid: u32) -> WkbResult<Box<dyn CoordTransformer>> {
    if from_srid == to_srid {
        return Ok(Box::new(IdentityTransformer));
    }
    match (from_srid, to_srid) {
        (4326, 3857) => Ok(Box::new(WebMercatorTransformer { direction: MercatorDirection::LonLatToMercator })),
        (3857, 4326) => Ok(Box::new(WebMercatorTransformer { direction: MercatorDirection::MercatorToLonLat })),
        _ => {
            #[cfg(feature = "proj")]
            {
                proj_backend::ProjTransformer::new(from_srid, to_srid)
                    .map(|t| Box::new(t) as Box<dyn CoordTransformer>)
            }
            #[cfg(not(feature = "proj"))]
            {
                Err(WkbError::UnknownSrid(to_srid))
            }
        }
    }
}

/// Bounded cache of constructed transformers, keyed by `(from_srid, to_srid)`.
/// Construction (especially PROJ's) is the expensive part; the per-vertex
/// transform itself is not cached.
pub struct TransformerCache {
    capacity: usize,
    entries: Mutex<VecDeque<(u32, u32, std::sync::Arc<dyn CoordTransformer>)>>,
}

impl TransformerCache {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    fn get_or_build(&self, from_srid: u32, to_srid: u32) -> WkbResult<std::sync::Arc<dyn CoordTransformer>> {
        let mut entries = self.entries.lock().expect("transformer cache mutex poisoned");
        if let Some(pos) = entries.iter().position(|(f, t, _)| *f == from_srid && *t == to_srid) {
            let entry = entries.remove(pos).unwrap();
            let transformer = entry.2.clone();
            entries.push_back(entry);
            return Ok(transformer);
        }
        drop(entries);

        let transformer: std::sync::Arc<dyn CoordTransformer> = build_transformer(from_srid, to_srid)?.into();
        let mut entries = self.entries.lock().expect("transformer cache mutex poisoned");
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back((from_srid, to_srid, transformer.clone()));
        Ok(transformer)
    }
}

impl Default for TransformerCache {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Reproject every vertex of `geom` from `from_srid` to `to_srid`, using
/// `cache` to avoid re-constructing the same transformer repeatedly. Returns
/// a new [`Geometry`] tagged with `to_srid`; topology is untouched and only
/// (X, Y[, Z]) ordinates are rewritten — M (or an untransformed 4th ordinate)
/// passes through unchanged.
pub fn reproject(geom: &Geometry, cache: &TransformerCache, from_srid: u32, to_srid: u32) -> WkbResult<Geometry> {
    let transformer = cache.get_or_build(from_srid, to_srid)?;
    let mut out = geom.clone();

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut zs = Vec::new();
    out.for_each_vertex_mut(&mut |v| {
        xs.push(v.x);
        ys.push(v.y);
        zs.push(v.z.unwrap_or(0.0));
    });

    if geom.has_z {
        transformer.transform_3d(&mut xs, &mut ys, &mut zs)?;
    } else {
        transformer.transform_2d(&mut xs, &mut ys)?;
    }

    let mut i = 0;
    out.for_each_vertex_mut(&mut |v| {
        v.x = xs[i];
        v.y = ys[i];
        if v.z.is_some() {
            v.z = Some(zs[i]);
        }
        i += 1;
    });

    out.srid = Some(to_srid);
    Ok(out)
}
