//! Benchmarks for the per-bar harmony helpers: note pools and pad voice
//! leading. Both run on the scheduler thread once per bar.

use std::hint::black_box;

use criterion::Criterion;
use lofi_engine::compose::melody::{Pool, MELODY_HIGH, MELODY_LOW};
use lofi_engine::compose::voice_leading::{lead_voices, root_position};
use lofi_engine::compose::{Chord, Composer, Prng};

pub fn bench_harmony(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/harmony");

    let mut composer = Composer::new(42);
    let key = composer.generate_new_patterns().key;
    let mut rng = Prng::new(42).bar_stream(0);
    let chords: Vec<Chord> = (0..7)
        .map(|degree| Chord::for_degree(&key, degree, &mut rng))
        .collect();

    group.bench_function("pool_build", |b| {
        b.iter(|| {
            for chord in &chords {
                black_box(Pool::new(&key, chord, MELODY_LOW, MELODY_HIGH));
            }
        })
    });

    let pools: Vec<Pool> = chords
        .iter()
        .map(|chord| Pool::new(&key, chord, MELODY_LOW, MELODY_HIGH))
        .collect();
    group.bench_function("pool_choose", |b| {
        b.iter(|| {
            for pool in &pools {
                black_box(pool.choose(&mut rng));
            }
        })
    });

    group.bench_function("lead_voices", |b| {
        b.iter(|| {
            let mut previous = root_position(chords[0].semitones());
            for chord in &chords[1..] {
                previous = lead_voices(chord.semitones(), black_box(&previous));
            }
            previous
        })
    });

    group.finish();
}
