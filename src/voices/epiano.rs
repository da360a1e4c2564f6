//! Electric piano voice.
//!
//! # How It Works
//!
//! 1. Sine at the played pitch is the body of the tone
//! 2. A second sine an octave up stands in for the tine, with its own fast
//!    decay so the bell only colours the attack
//! 3. The note envelope shapes both, a low-pass rounds off the top

use crate::dsp::Adsr;
use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

pub fn epiano(shape: Adsr) -> impl GraphNode {
    let tine = OscNode::sine()
        .with_ratio(2.0)
        .amplify(EnvNode::adsr(0.001, 0.3, 0.0, 0.1));

    OscNode::sine()
        .mix(tine, 0.3)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(3_000.0))
}
