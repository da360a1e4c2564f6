use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chain: the source renders into `out`, then the effect processes it
/// in place.
pub struct Through<S, E> {
    pub source: S,
    pub effect: E,
}

impl<S, E> Through<S, E> {
    pub fn new(source: S, effect: E) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, E: GraphNode> GraphNode for Through<S, E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.effect.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.effect.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }

    fn is_active(&self) -> bool {
        self.source.is_active() || self.effect.is_active()
    }
}
