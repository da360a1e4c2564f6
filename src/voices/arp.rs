//! Arpeggio pluck: triangle (or the note's own waveform) with a short,
//! sustain-less envelope.

use crate::dsp::{Adsr, Waveform};
use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode};

pub fn arp(shape: Adsr, waveform: Waveform) -> impl GraphNode {
    OscNode::new(waveform)
        .amplify(EnvNode::from_shape(shape))
        .through(FilterNode::lowpass(2_500.0))
}
