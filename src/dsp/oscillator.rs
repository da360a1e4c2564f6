use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::graph::node::RenderCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

// Every noise source gets its own seed so simultaneous hits don't phase-lock.
static NOISE_SEEDS: AtomicU32 = AtomicU32::new(0x9E37_79B9);

/// Phase-accumulator oscillator. Saw and square use PolyBLEP to soften the
/// discontinuities; noise is a xorshift32 generator.
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
    noise_state: u32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        let seed = NOISE_SEEDS.fetch_add(0x6D2B_79F5, Ordering::Relaxed);
        Self {
            waveform,
            phase: 0.0,
            noise_state: seed | 1,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = (ctx.frequency / ctx.sample_rate).clamp(0.0, 0.5);

        for sample in out.iter_mut() {
            *sample = match self.waveform {
                Waveform::Sine => (TAU * self.phase).sin(),
                Waveform::Saw => 2.0 * self.phase - 1.0 - poly_blep(self.phase, increment),
                Waveform::Square => {
                    let naive = if self.phase < 0.5 { 1.0 } else { -1.0 };
                    naive + poly_blep(self.phase, increment)
                        - poly_blep((self.phase + 0.5).fract(), increment)
                }
                Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
                Waveform::Noise => self.next_noise(),
            };

            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

#[inline]
fn poly_blep(phase: f32, increment: f32) -> f32 {
    if increment <= 0.0 {
        return 0.0;
    }
    if phase < increment {
        let t = phase / increment;
        t + t - t * t - 1.0
    } else if phase > 1.0 - increment {
        let t = (phase - 1.0) / increment;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}
