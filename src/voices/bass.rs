//! Bass voice.
//!
//! A sine carries the fundamental; a quiet triangle on top gives it just
//! enough harmonics to be heard on small speakers.

use crate::dsp::Adsr;
use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

pub fn bass(shape: Adsr) -> impl GraphNode {
    OscNode::sine()
        .mix(OscNode::triangle(), 0.25)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(420.0))
}
