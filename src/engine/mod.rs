//! Playback control: the lookahead scheduler, the thread that drives it and
//! the public [`Engine`] facade.

pub mod facade;
pub mod scheduler;
pub mod status;
pub mod ticker;

pub use facade::Engine;
pub use scheduler::Scheduler;
pub use status::{PlaybackSnapshot, PlaybackStatus};
pub use ticker::{Control, SchedulerTask, Ticker};
