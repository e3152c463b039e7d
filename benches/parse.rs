use criterion::{criterion_group, criterion_main};

use wkbcodec::geometry::{Geometry, GeometryValue, Vertex};
use wkbcodec::writer::encode_ewkb;

/// A single closed ring of `n` points walking a unit circle, standing in for
/// the large real-world polygons the decoder is expected to handle without
/// exceeding O(input) allocation.
fn synthetic_ring(n: usize) -> Vec<Vertex> {
    let mut ring = Vec::with_capacity(n + 1);
    for i in 0..n {
        let theta = (i as f64) / (n as f64) * std::f64::consts::TAU;
        ring.push(Vertex::xy(theta.cos(), theta.sin()));
    }
    ring.push(ring[0]);
    ring
}

fn synthetic_polygon(n: usize) -> Geometry {
    Geometry::new(GeometryValue::Polygon(vec![synthetic_ring(n)]), false, false, Some(4326))
}

fn bench_parse(c: &mut criterion::Criterion) {
    let small = synthetic_polygon(32);
    let big = synthetic_polygon(300_000);
    let small_ewkb = encode_ewkb(&small);
    let big_ewkb = encode_ewkb(&big);

    c.bench_function("decode ewkb small polygon", |bencher| {
        bencher.iter(|| {
            let _ = wkbcodec::reader::decode_ewkb(&small_ewkb).unwrap();
        });
    });

    c.bench_function("decode ewkb large polygon", |bencher| {
        bencher.iter(|| {
            let _ = wkbcodec::reader::decode_ewkb(&big_ewkb).unwrap();
        });
    });

    c.bench_function("encode ewkb small polygon", |bencher| {
        bencher.iter(|| {
            let _ = encode_ewkb(&small);
        });
    });

    c.bench_function("encode ewkb large polygon", |bencher| {
        bencher.iter(|| {
            let _ = encode_ewkb(&big);
        });
    });

    c.bench_function("large polygon to geojson", |bencher| {
        bencher.iter(|| {
            let geom = wkbcodec::reader::decode_ewkb(&big_ewkb).unwrap();
            let _ = wkbcodec::geojson::geometry_to_geojson(&geom);
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
