//! Lead voice for the short melodic fills.

use crate::dsp::{Adsr, Waveform};
use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

/// `waveform` is the main oscillator (triangle unless the note asks for
/// something else); a slightly flat square sits underneath for bite.
pub fn lead(shape: Adsr, waveform: Waveform) -> impl GraphNode {
    OscNode::new(waveform)
        .mix(OscNode::square().with_detune(-4.0), 0.2)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(2_200.0))
}
