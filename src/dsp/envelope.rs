use crate::{graph::node::RenderCtx, MIN_TIME};

/// Attack/decay/sustain/release times in seconds (sustain is a level).
///
/// Instruments carry one of these as their default shape; a note may bring
/// its own to override it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Adsr {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Linear ADSR generator.
///
/// `note_on` restarts from zero; `note_off` releases from whatever level the
/// envelope has reached, so an early release never jumps.
pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,

    stage: EnvelopeStage,
    level: f32,

    release_from: f32,
    release_len: u32,
    release_pos: u32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(MIN_TIME),
            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_from: 0.0,
            release_len: 1,
            release_pos: 0,
        }
    }

    pub fn from_shape(shape: Adsr) -> Self {
        Self::adsr(shape.attack, shape.decay, shape.sustain, shape.release)
    }

    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.level = 0.0;
        self.release_pos = 0;
        self.stage = EnvelopeStage::Attack;
    }

    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }
        self.release_from = self.level;
        self.release_len = (self.release * ctx.sample_rate).round().max(1.0) as u32;
        self.release_pos = 0;
        self.stage = EnvelopeStage::Release;
    }

    #[inline]
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => self.level = 0.0,
            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= (1.0 - self.sustain) / (self.decay * ctx.sample_rate);
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => self.level = self.sustain,
            EnvelopeStage::Release => {
                let progress = self.release_pos as f32 / self.release_len as f32;
                self.level = (self.release_from * (1.0 - progress)).max(0.0);
                self.release_pos += 1;
                if self.release_pos >= self.release_len {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }
        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn release_time(&self) -> f32 {
        self.release
    }
}
