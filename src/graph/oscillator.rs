use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/// Audio-rate oscillator node.
///
/// By default it follows the voice pitch from `RenderCtx`. `with_frequency`
/// pins it (drums), `with_ratio` turns it into a partial of the voice pitch
/// (electric piano tine) and `with_detune` offsets it in cents.
///
/// ```ignore
/// // Kick: sine that starts 100 Hz above its 50 Hz resting pitch
/// OscNode::sine()
///     .with_frequency(50.0)
///     .modulate(EnvNode::adsr(0.001, 0.12, 0.0, 0.01), OscParam::Frequency, 100.0)
/// ```
pub struct OscNode {
    osc: OscillatorBlock,
    fixed_frequency: Option<f32>,
    current_frequency: f32,
    ratio: f32,
    detune_cents: f32,
    current_detune: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Only meaningful together with `with_frequency`.
    Frequency,
    /// Cents, 100 per semitone.
    Detune,
}

impl OscNode {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            fixed_frequency: None,
            current_frequency: 440.0,
            ratio: 1.0,
            detune_cents: 0.0,
            current_detune: 0.0,
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

    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.fixed_frequency = Some(freq);
        self.current_frequency = freq;
        self
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self.current_detune = cents;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let base = match self.fixed_frequency {
            Some(_) => self.current_frequency,
            None => ctx.frequency * self.ratio,
        };
        let frequency = if self.current_detune != 0.0 {
            base * 2.0_f32.powf(self.current_detune / 1200.0)
        } else {
            base
        };

        let osc_ctx = RenderCtx { frequency, ..*ctx };
        self.osc.render(out, &osc_ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        if let Some(fixed) = self.fixed_frequency {
            self.current_frequency = fixed;
        }
        self.current_detune = self.detune_cents;
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.fixed_frequency.unwrap_or(440.0),
            OscParam::Detune => self.detune_cents,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                self.current_frequency = (base + modulation).clamp(20.0, 20_000.0);
            }
            OscParam::Detune => {
                self.current_detune = (base + modulation).clamp(-200.0, 200.0);
            }
        }
    }
}
