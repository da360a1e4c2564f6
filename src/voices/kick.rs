//! Kick drum voice.
//!
//! A sine pinned at 50 Hz whose pitch is pushed up by its own fast envelope,
//! so every hit starts at 150 Hz and falls onto the fundamental. That drop
//! is the punch; the amplitude envelope is the boom.

use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

pub const KICK_REST_HZ: f32 = 50.0;
pub const KICK_SWEEP_HZ: f32 = 100.0;

pub fn kick() -> impl GraphNode {
    OscNode::sine()
        .with_frequency(KICK_REST_HZ)
        .modulate(EnvNode::adsr(0.001, 0.09, 0.0, 0.01), OscParam::Frequency, KICK_SWEEP_HZ)
        .amplify(EnvNode::adsr(0.001, 0.4, 0.0, 0.05))
        .through(FilterNode::lowpass(300.0))
}
