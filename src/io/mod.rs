//! Everything between scheduled voices and the speakers: the audio clock,
//! the render-thread voice rack, the effects bus, output devices, and the
//! persisted settings.

pub mod bus;
pub mod clock;
pub mod device;
pub mod persistence;
pub mod rack;
pub mod renderer;

pub use clock::AudioClock;
pub use device::{CpalOutput, OfflineOutput, OutputDevice};
pub use persistence::{JsonFileStore, MemoryStore, VolumeStore};
pub use renderer::OutputPort;
