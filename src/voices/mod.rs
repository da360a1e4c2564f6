//! Voice graphs for every instrument and drum.
//!
//! Each function builds a fresh node graph for a single note. Pitched voices
//! take the note's envelope shape (and, where it matters, its waveform); the
//! drums carry their own envelopes and ignore the note pitch.
//!
//! ```ignore
//! use lofi_engine::{dsp::Adsr, voices};
//!
//! let pad = voices::pad(Adsr::new(1.2, 0.8, 0.7, 2.5));
//! let kick = voices::kick();
//! ```

mod arp;
mod atmosphere;
mod bass;
mod epiano;
mod flute;
mod hihat;
mod kick;
mod lead;
mod pad;
mod snare;

pub use arp::arp;
pub use atmosphere::atmosphere;
pub use bass::bass;
pub use epiano::epiano;
pub use flute::flute;
pub use hihat::hihat;
pub use kick::kick;
pub use lead::lead;
pub use pad::pad;
pub use snare::snare;
