//! Seeded linear-congruential generator.
//!
//! `value = (value * 9301 + 49297) mod 233280`, divided by the modulus for a
//! float in [0, 1). Every concern draws from its own stream, addressed by an
//! integer offset from the session seed, so adding a draw to one bar never
//! shifts another bar's material.

const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;
const MODULUS: u64 = 233_280;

/// Stream that decides tempo, key, scale, progression and tone.
pub const PATTERN_STREAM: u64 = 100;
/// Bar `n` draws from `BAR_STREAM_BASE + n`.
pub const BAR_STREAM_BASE: u64 = 1_000;
/// Offset shift applied per pattern re-roll.
pub const VARIATION_STRIDE: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prng {
    seed: u64,
    variation: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self { seed, variation: 0 }
    }

    pub fn with_variation(mut self, variation: u64) -> Self {
        self.variation = variation;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn variation(&self) -> u64 {
        self.variation
    }

    pub fn stream(&self, offset: u64) -> Stream {
        let shift = (self.variation % MODULUS) * (VARIATION_STRIDE % MODULUS) % MODULUS;
        let start = (self.seed % MODULUS + offset % MODULUS + shift) % MODULUS;
        Stream { value: start }
    }

    pub fn pattern_stream(&self) -> Stream {
        self.stream(PATTERN_STREAM)
    }

    pub fn bar_stream(&self, bar: u64) -> Stream {
        self.stream(BAR_STREAM_BASE + bar)
    }
}

#[derive(Debug, Clone)]
pub struct Stream {
    value: u64,
}

impl Stream {
    pub fn next_f64(&mut self) -> f64 {
        self.value = (self.value * MULTIPLIER + INCREMENT) % MODULUS;
        self.value as f64 / MODULUS as f64
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform index in `0..n`; 0 when `n == 0`.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Uniform integer in `lo..=hi`.
    pub fn between(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.below((hi - lo + 1) as usize) as u32
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}
