//! Pad voice: the chord bed under everything else.
//!
//! Two sawtooths a few cents apart, each drifting on its own slow LFO the way
//! a worn tape transport wobbles, then darkened hard by a low-pass.

use crate::dsp::Adsr;
use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    lfo::LfoNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

pub fn pad(shape: Adsr) -> impl GraphNode {
    let left = OscNode::sawtooth().modulate(LfoNode::sine(0.31), OscParam::Detune, 6.0);
    let right = OscNode::sawtooth()
        .with_detune(9.0)
        .modulate(LfoNode::sine(0.23), OscParam::Detune, 6.0);

    left.mix(right, 0.5)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(1_600.0))
}
