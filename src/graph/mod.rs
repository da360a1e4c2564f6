//! Composable building blocks for voice graphs.
//!
//! Graph nodes wrap the DSP primitives with note events, block rendering and
//! parameter modulation. `extensions::NodeExt` adds the fluent combinators
//! every voice in `crate::voices` is written with.

/// Multiply two signals together (amplitude control), fixed gain.
pub mod amplify;
/// Envelope generator node exposing ADSR state.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`, `.gain()`, etc.).
pub mod extensions;
/// Filter node with modulatable cutoff.
pub mod filter;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Linear mixing of parallel sources.
pub mod mix;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source -> effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
