//! Benchmarks of shape construction and morph sampling.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use shapemorph::{CornerRounding, Morph, Point, RoundedPolygon};

fn bench_construction(cc: &mut Criterion) {
    cc.bench_function("star construction", |bb| {
        bb.iter(|| {
            RoundedPolygon::star(
                black_box(8),
                black_box(200.0),
                black_box(100.0),
                CornerRounding::new(20.0),
                None,
                None,
                Point::ZERO,
            )
        });
    });

    let hexagon = RoundedPolygon::from_num_vertices(
        6,
        250.0,
        Point::ZERO,
        CornerRounding::new(20.0),
        None,
    );
    let star = RoundedPolygon::star(
        6,
        250.0,
        125.0,
        CornerRounding::new(20.0),
        None,
        None,
        Point::ZERO,
    );
    cc.bench_function("morph construction", |bb| {
        bb.iter(|| Morph::new(black_box(&hexagon), black_box(&star)));
    });
}

fn bench_sampling(cc: &mut Criterion) {
    let hexagon = RoundedPolygon::from_num_vertices(
        6,
        250.0,
        Point::ZERO,
        CornerRounding::new(20.0),
        None,
    );
    let star = RoundedPolygon::star(
        6,
        250.0,
        125.0,
        CornerRounding::new(20.0),
        None,
        None,
        Point::ZERO,
    );
    let morph = Morph::new(&hexagon, &star);

    cc.bench_function("morph as_cubics", |bb| {
        bb.iter(|| morph.as_cubics(black_box(0.42)));
    });

    cc.bench_function("morph for_each_cubic", |bb| {
        bb.iter(|| {
            let mut acc = 0.0;
            morph.for_each_cubic(black_box(0.42), |c| acc += c.anchor0().x);
            acc
        });
    });
}

criterion_group!(benches, bench_construction, bench_sampling);
criterion_main!(benches);
