use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Linear crossfade of two parallel sources: `a * (1 - balance) + b * balance`.
///
/// Both sides see every note event, so put the envelope after the mix if it
/// should gate both.
pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    pub balance: f32,
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Mix {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.source_b.render_block(frames, ctx);

        let weight_b = self.balance;
        let weight_a = 1.0 - weight_b;
        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o = *o * weight_a + *b * weight_b;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source_a.note_on(ctx);
        self.source_b.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source_a.note_off(ctx);
        self.source_b.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        match (
            self.source_a.get_envelope_level(),
            self.source_b.get_envelope_level(),
        ) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extensions::NodeExt;
    use crate::graph::oscillator::OscNode;

    #[test]
    fn balance_extremes_select_one_side() {
        let ctx = RenderCtx::from_freq(48_000.0, 330.0, 1.0);
        let mut only_a = OscNode::sine().mix(OscNode::square(), 0.0);
        let mut reference = OscNode::sine();

        let mut a = vec![0.0f32; 128];
        let mut r = vec![0.0f32; 128];
        only_a.render_block(&mut a, &ctx);
        reference.render_block(&mut r, &ctx);
        assert_eq!(a, r);
    }

    #[test]
    fn clamps_balance() {
        let mix = Mix::new(OscNode::sine(), OscNode::sine(), 3.0);
        assert_eq!(mix.balance, 1.0);
    }
}
