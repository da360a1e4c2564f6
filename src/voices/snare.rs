//! Snare drum voice.
//!
//! # How It Works
//!
//! 1. Band-passed noise is the wire rattle
//! 2. A triangle at a fixed 190 Hz is the drum head
//! 3. The rattle rings a little longer than the body; both are mixed with
//!    the rattle on top

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

pub fn snare() -> impl GraphNode {
    let rattle = OscNode::noise()
        .through(FilterNode::bandpass(2_500.0).with_resonance(0.3))
        .amplify(EnvNode::adsr(0.001, 0.16, 0.0, 0.06));

    let body = OscNode::triangle()
        .with_frequency(190.0)
        .amplify(EnvNode::adsr(0.001, 0.09, 0.0, 0.04));

    body.mix(rattle, 0.65)
}
