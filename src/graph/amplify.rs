use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// `signal * modulator`, sample by sample. With an `EnvNode` on the right
/// this is the VCA of every voice.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let gains = &mut self.temp_buffer[..out.len()];
        gains.fill(0.0);
        self.modulator.render_block(gains, ctx);

        for (o, g) in out.iter_mut().zip(gains.iter()) {
            *o *= *g;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.modulator
            .get_envelope_level()
            .or_else(|| self.signal.get_envelope_level())
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active() || self.signal.is_active()
    }
}

/// Fixed gain stage.
pub struct Gain<N> {
    pub source: N,
    pub gain: f32,
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        for sample in out.iter_mut() {
            *sample *= self.gain;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::envelope::EnvNode;
    use crate::graph::extensions::NodeExt;
    use crate::graph::oscillator::OscNode;

    #[test]
    fn envelope_gates_signal() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut voice = OscNode::square().amplify(EnvNode::adsr(0.001, 0.01, 0.5, 0.001));

        let mut buffer = vec![0.0f32; 256];
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 0.0), "idle envelope is silent");
        assert!(!voice.is_active());

        voice.note_on(&ctx);
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().any(|s| s.abs() > 0.4));
        assert!(voice.is_active());
    }

    #[test]
    fn gain_scales() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut quiet = OscNode::square().gain(0.25);
        let mut buffer = vec![0.0f32; 64];
        quiet.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|s| s.abs() <= 0.26));
    }
}
