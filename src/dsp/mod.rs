//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Everything here allocates only at construction and is safe to run on the
//! render thread.

/// Uniformly partitioned FFT convolution and impulse generation.
pub mod convolution;
/// Delay line and damped feedback echo.
pub mod delay;
/// Soft clipping / tape saturation.
pub mod distortion;
/// Linear ADSR envelope generator.
pub mod envelope;
/// State-variable filter.
pub mod filter;
pub mod modulate;
/// Band-limited oscillators and noise.
pub mod oscillator;

pub use envelope::{Adsr, EnvelopeStage};
pub use oscillator::Waveform;
