//! Seed-driven composition.
//!
//! Nothing in here touches audio: the composer turns a seed into a
//! [`Composition`] and then into one [`BarPlan`] per bar, and the engine
//! decides when those notes sound.

pub mod chord;
pub mod composer;
pub mod drums;
pub mod melody;
pub mod note;
pub mod prng;
pub mod theory;
pub mod voice_leading;

pub use chord::{Chord, Key};
pub use composer::{BarPlan, Composer, Composition, ToneSettings};
pub use drums::DrumPattern;
pub use note::{DrumKind, Instrument, NoteEvent};
pub use prng::Prng;
