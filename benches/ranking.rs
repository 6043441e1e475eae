//! Benchmarking proximity ranking
//! over typical and large provider replies
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use overhead::prelude::*;

fn constellation(size: u64) -> Vec<SatelliteRecord> {
    (0..size)
        .map(|id| {
            SatelliteRecord::new(
                id,
                "STARLINK",
                -60.0 + (id % 120) as f64,
                -180.0 + (id * 7 % 360) as f64,
                540.0 + (id % 30) as f64,
            )
        })
        .collect()
}

fn benchmark(c: &mut Criterion) {
    let observer = ObserverPosition::new(40.0, -75.0, 10.0);
    let mut ranking_grp = c.benchmark_group("ranking");

    for size in [100, 1_000, 10_000] {
        let raw = constellation(size);
        ranking_grp.bench_function(format!("top10/{}", size), |b| {
            b.iter(|| {
                let _ = rank(black_box(&observer), black_box(&raw), 10);
            })
        });
    }

    ranking_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
