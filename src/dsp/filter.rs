use std::f32::consts::PI;

use crate::graph::node::RenderCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandPass,
}

/// Topology-preserving-transform state variable filter (Zavalishin / Simper).
///
/// All three responses come out of the same two integrators; `kind` only
/// picks which one is written back. Resonance runs 0.0 (Q = 0.5) up to just
/// below 1.0 (self oscillation).
pub struct SVFilter {
    s1: f32,
    s2: f32,
    cutoff_hz: f32,
    resonance: f32,
    kind: FilterKind,
}

impl SVFilter {
    pub fn new(kind: FilterKind, cutoff_hz: f32) -> Self {
        Self {
            s1: 0.0,
            s2: 0.0,
            cutoff_hz,
            resonance: 0.0,
            kind,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::BandPass, cutoff_hz)
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.set_resonance(resonance);
        self
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.98);
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        // Keep the prewarped cutoff below Nyquist.
        let cutoff = self.cutoff_hz.clamp(10.0, ctx.sample_rate * 0.45);
        let g = (PI * cutoff / ctx.sample_rate).tan();
        let k = 2.0 - 2.0 * self.resonance;
        let h = 1.0 / (1.0 + g * (g + k));

        for sample in buffer.iter_mut() {
            let input = *sample;
            let band = h * (self.s1 + g * (input - self.s2));
            let low = self.s2 + g * band;
            self.s1 = 2.0 * band - self.s1;
            self.s2 = 2.0 * low - self.s2;

            *sample = match self.kind {
                FilterKind::LowPass => low,
                FilterKind::BandPass => band,
                FilterKind::HighPass => input - k * band - low,
            };
        }
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
