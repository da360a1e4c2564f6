//! Flute voice.
//!
//! A sine with gentle vibrato plus a thin band of noise for the breath.
//! The breath filter does not track pitch; across the flute register the
//! noise reads as air rather than as a second tone.

use crate::dsp::Adsr;
use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    lfo::LfoNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

pub fn flute(shape: Adsr) -> impl GraphNode {
    let tone = OscNode::sine().modulate(LfoNode::sine(4.8), OscParam::Detune, 7.0);
    let breath = OscNode::noise().through(FilterNode::bandpass(1_800.0).with_resonance(0.6));

    tone.mix(breath, 0.12).amplify(EnvNode::from_shape(shape))
}
