use crate::dsp::filter::SVFilter;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Resonance,
}

/// In-place filter stage, meant to sit on the right of `.through()`.
pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_resonance: f32,
}

impl FilterNode {
    fn wrap(filter: SVFilter, cutoff_hz: f32) -> Self {
        Self {
            filter,
            base_cutoff: cutoff_hz,
            base_resonance: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::wrap(SVFilter::lowpass(cutoff_hz), cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::wrap(SVFilter::highpass(cutoff_hz), cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::wrap(SVFilter::bandpass(cutoff_hz), cutoff_hz)
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.filter.set_resonance(resonance);
        self.base_resonance = resonance;
        self
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Resonance => self.base_resonance,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            FilterParam::Cutoff => self.filter.set_cutoff((base + modulation).clamp(20.0, 20_000.0)),
            FilterParam::Resonance => self.filter.set_resonance(base + modulation),
        }
    }
}
