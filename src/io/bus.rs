//! The persistent effects chain every voice ends up in.
//!
//! ```text
//! voices ─▶ master gain ─▶ low-pass ─┬─▶ dry ─────────────┐
//!                                    ├─▶ feedback delay ──┼─▶ saturation ─▶ out
//!                                    └─▶ reverb ──────────┘
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use log::warn;

use crate::compose::ToneSettings;
use crate::dsp::convolution::{impulse_response, ConvolutionReverb};
use crate::dsp::delay::FeedbackDelay;
use crate::dsp::distortion::saturate;
use crate::dsp::filter::SVFilter;
use crate::graph::node::RenderCtx;
use crate::MAX_BLOCK_SIZE;

const GAIN_RAMP_SECONDS: f32 = 0.02;
const MAX_DELAY_SECONDS: f32 = 2.0;
const ECHO_DAMPING_HZ: f32 = 2_500.0;
const IMPULSE_SEED: u32 = 0x1f0e_4d2b;

const DRY_LEVEL: f32 = 0.75;
const DELAY_SEND: f32 = 0.3;
const REVERB_SEND: f32 = 0.35;
const TAPE_DRIVE: f32 = 1.6;

/// f32 stored as raw bits so both threads can touch it without a lock.
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Control surface of the bus, shared with the engine thread.
#[derive(Debug)]
pub struct BusControls {
    volume: AtomicF32,
    muted: AtomicBool,
    cutoff_hz: AtomicF32,
    delay_seconds: AtomicF32,
    feedback: AtomicF32,
}

impl BusControls {
    /// Starts muted; the engine unmutes on start.
    pub fn new(volume: f32) -> Self {
        Self {
            volume: AtomicF32::new(volume.clamp(0.0, 1.0)),
            muted: AtomicBool::new(true),
            cutoff_hz: AtomicF32::new(2_200.0),
            delay_seconds: AtomicF32::new(0.375),
            feedback: AtomicF32::new(0.3),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume.load()
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume.store(volume.clamp(0.0, 1.0));
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub fn apply_tone(&self, tone: &ToneSettings) {
        self.cutoff_hz.store(tone.cutoff_hz);
        self.delay_seconds.store(tone.delay_seconds);
        self.feedback.store(tone.feedback);
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz.load()
    }

    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds.load()
    }

    pub fn feedback(&self) -> f32 {
        self.feedback.load()
    }

    /// Gain the bus is heading for right now.
    pub fn target_gain(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            self.volume()
        }
    }
}

pub struct EffectsBus {
    sample_rate: f32,
    gain: f32,
    ramp_per_sample: f32,
    tone: SVFilter,
    echo: FeedbackDelay,
    reverb: Option<ConvolutionReverb>,
    echo_buf: Vec<f32>,
    reverb_buf: Vec<f32>,
}

impl EffectsBus {
    /// A reverb that cannot be built is left out; the rest of the chain
    /// still runs.
    pub fn new(sample_rate: f32, reverb_seconds: f32, reverb_decay: f32) -> Self {
        let impulse = impulse_response(sample_rate, reverb_seconds, reverb_decay, IMPULSE_SEED);
        let reverb = match ConvolutionReverb::new(&impulse) {
            Ok(reverb) => Some(reverb),
            Err(err) => {
                warn!("reverb disabled: {err}");
                None
            }
        };
        Self::with_reverb(sample_rate, reverb)
    }

    pub fn with_reverb(sample_rate: f32, reverb: Option<ConvolutionReverb>) -> Self {
        Self {
            sample_rate,
            gain: 0.0,
            ramp_per_sample: 1.0 / (GAIN_RAMP_SECONDS * sample_rate).max(1.0),
            tone: SVFilter::lowpass(2_200.0).with_resonance(0.2),
            echo: FeedbackDelay::new(sample_rate, MAX_DELAY_SECONDS, ECHO_DAMPING_HZ),
            reverb,
            echo_buf: vec![0.0; MAX_BLOCK_SIZE],
            reverb_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn has_reverb(&self) -> bool {
        self.reverb.is_some()
    }

    /// Gain currently applied, mid-ramp values included.
    pub fn current_gain(&self) -> f32 {
        self.gain
    }

    /// Runs `block` (the summed voices) through the chain in place.
    pub fn process(&mut self, block: &mut [f32], controls: &BusControls) {
        for chunk in block.chunks_mut(MAX_BLOCK_SIZE) {
            self.process_chunk(chunk, controls);
        }
    }

    fn process_chunk(&mut self, block: &mut [f32], controls: &BusControls) {
        let n = block.len();
        let target = controls.target_gain();
        for sample in block.iter_mut() {
            let delta = (target - self.gain).clamp(-self.ramp_per_sample, self.ramp_per_sample);
            self.gain += delta;
            *sample *= self.gain;
        }

        let ctx = RenderCtx::from_freq(self.sample_rate, 0.0, 1.0);
        self.tone.set_cutoff(controls.cutoff_hz());
        self.tone.render(block, &ctx);

        let echo = &mut self.echo_buf[..n];
        echo.copy_from_slice(block);
        let delay_samples = (controls.delay_seconds() * self.sample_rate).round() as usize;
        self.echo.process(echo, delay_samples, controls.feedback());

        let wet = &mut self.reverb_buf[..n];
        match self.reverb.as_mut() {
            Some(reverb) => {
                wet.copy_from_slice(block);
                reverb.process(wet);
            }
            None => wet.fill(0.0),
        }

        for ((out, &e), &r) in block.iter_mut().zip(echo.iter()).zip(wet.iter()) {
            *out = *out * DRY_LEVEL + e * DELAY_SEND + r * REVERB_SEND;
        }
        saturate(block, TAPE_DRIVE);
    }
}
