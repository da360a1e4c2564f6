//! Benchmarks for tape saturation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::dsp::distortion;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("saturate", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::saturate(black_box(&mut buffer), black_box(1.6));
            })
        });
    }

    group.finish();
}
