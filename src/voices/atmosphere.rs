//! Atmosphere drone.
//!
//! Sine and triangle an octave apart with a very slow wow, sitting below the
//! pads. Velocity is kept tiny by the composer; the drone is felt more than
//! heard.

use crate::dsp::Adsr;
use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    lfo::LfoNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

pub fn atmosphere(shape: Adsr) -> impl GraphNode {
    let low = OscNode::sine().modulate(LfoNode::sine(0.11), OscParam::Detune, 10.0);
    let high = OscNode::triangle()
        .with_ratio(2.0)
        .modulate(LfoNode::triangle(0.07), OscParam::Detune, 12.0);

    low.mix(high, 0.35)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(900.0))
}
