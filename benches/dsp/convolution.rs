//! Benchmarks for the partitioned convolution reverb.
//!
//! Cost is uneven: most calls only buffer samples, one call per partition
//! pays for the FFTs. Larger blocks average that out.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::dsp::convolution::{impulse_response, ConvolutionReverb};

use crate::BLOCK_SIZES;

pub fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/convolution");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();

        for seconds in [0.5f32, 2.5] {
            let impulse = impulse_response(sample_rate, seconds, 3.0, 7);
            let Ok(mut reverb) = ConvolutionReverb::new(&impulse) else {
                continue;
            };
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("room_{}ms", (seconds * 1000.0) as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        reverb.process(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
