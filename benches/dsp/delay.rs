//! Benchmarks for the damped feedback echo.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::dsp::delay::FeedbackDelay;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay times in samples at 48kHz
    let delay_times: &[usize] = &[
        27_000, // dotted eighth at 80 BPM
        36_000, // quarter at 80 BPM
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let delay_ms = delay_samples as f32 / 48.0;
            let mut delay = FeedbackDelay::new(48_000.0, 2.0, 2_500.0);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("echo_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.process(black_box(&mut buffer), black_box(delay_samples), 0.4);
                    })
                },
            );
        }
    }

    group.finish();
}
