//! Note-to-voice layer.
//!
//! Sits between the composer's note descriptors and the render thread: looks
//! up the instrument, builds its graph and pins it to frames on the audio
//! clock.

pub mod instrument;
pub mod synthesizer;
pub mod voice;

pub use instrument::{DurationMode, InstrumentProfile};
pub use synthesizer::{Synthesizer, VoiceTiming};
pub use voice::{ScheduledVoice, VoiceSink, VoiceState};
