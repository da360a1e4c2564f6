//! Closed hi-hat: high-passed noise with a resonant band-pass layered in for
//! the metallic presence.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

pub fn hihat() -> impl GraphNode {
    let air = OscNode::noise().through(FilterNode::highpass(7_000.0));
    let presence = OscNode::noise().through(FilterNode::bandpass(10_000.0).with_resonance(0.5));

    air.mix(presence, 0.3)
        .amplify(EnvNode::adsr(0.001, 0.045, 0.0, 0.03))
}
