//! Engine-level benchmarks.
//!
//! Instrument voices as the synthesizer builds them, bar generation and its
//! harmony helpers on the scheduler thread, and the effects bus and render
//! path the audio callback runs.

mod bus;
mod composer;
mod harmony;
mod render;
mod voices;

pub use bus::bench_bus;
pub use composer::bench_composer;
pub use harmony::bench_harmony;
pub use render::bench_render;
pub use voices::bench_voices;
