//! Benchmarks for the master effects bus fed with a pad chord and a kick,
//! the mix it sees on every downbeat.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::compose::Composer;
use lofi_engine::dsp::Adsr;
use lofi_engine::graph::node::{GraphNode, RenderCtx};
use lofi_engine::io::bus::{BusControls, EffectsBus};
use lofi_engine::voices;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

/// One block of three pad voices plus a kick, summed.
fn downbeat_mix(size: usize) -> Vec<f32> {
    let shape = Adsr::new(1.2, 0.8, 0.7, 2.5);
    let mut mix = vec![0.0f32; size];
    let mut scratch = vec![0.0f32; size];

    for frequency in [220.0, 261.63, 329.63] {
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, frequency, 0.5);
        let mut pad = voices::pad(shape);
        pad.note_on(&ctx);
        pad.render_block(&mut scratch, &ctx);
        mix.iter_mut().zip(&scratch).for_each(|(m, s)| *m += s);
    }

    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 0.0, 1.0);
    let mut kick = voices::kick();
    kick.note_on(&ctx);
    kick.render_block(&mut scratch, &ctx);
    mix.iter_mut().zip(&scratch).for_each(|(m, s)| *m += s);
    mix
}

pub fn bench_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bus");

    let mut composer = Composer::new(42);
    let tone = composer.generate_new_patterns().tone;
    let controls = BusControls::new(0.7);
    controls.apply_tone(&tone);
    controls.set_muted(false);

    for &size in BLOCK_SIZES {
        let input = downbeat_mix(size);

        let mut bus = EffectsBus::new(SAMPLE_RATE, 2.5, 3.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("full_chain", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bus.process(black_box(&mut buffer), black_box(&controls));
            })
        });

        // Same chain with the reverb send disabled
        let mut bus = EffectsBus::with_reverb(SAMPLE_RATE, None);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("dry_and_echo", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bus.process(black_box(&mut buffer), black_box(&controls));
            })
        });
    }

    group.finish();
}
