//! Generative lo-fi background music.
//!
//! A seed picks a key, scale, tempo and chord progression; the composer then
//! writes one bar at a time (pads, bass, fills, drums, drone) and a lookahead
//! scheduler turns every note into a sample-accurate voice on the render
//! thread, where it runs through a persistent effects bus.
//!
//! ```ignore
//! use lofi_engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! engine.set_volume(0.6);
//! engine.start()?;
//! ```

pub mod compose; // Seeded harmony, rhythm and bar plans
pub mod config;
pub mod dsp;
pub mod engine; // Scheduler, ticker thread and the public facade
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod io; // Clock, voice rack, effects bus, output devices, settings
pub mod synth; // Instrument table and voice scheduling
pub mod voices;

pub use config::EngineConfig;
pub use engine::{Engine, PlaybackSnapshot};
pub use error::EngineError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
