use std::path::PathBuf;

use serde::Deserialize;

/// Tunables for one engine instance. Every field has a default, so a config
/// file only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed; wall-clock milliseconds when absent.
    pub seed: Option<u64>,
    /// Scheduler horizon ahead of the audio clock, in seconds.
    pub lookahead_seconds: f64,
    pub tick_interval_ms: u64,
    /// Gap between `start()` and the first scheduled step.
    pub start_offset_seconds: f64,
    /// Volume used when nothing has been persisted yet.
    pub default_volume: f32,
    pub voice_queue_capacity: usize,
    /// Voices the render thread mixes at once; extra voices wait in the queue.
    pub max_voices: usize,
    pub reverb_seconds: f32,
    pub reverb_decay: f32,
    /// Where the volume is persisted. `None` keeps it in memory.
    pub settings_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            lookahead_seconds: 0.1,
            tick_interval_ms: 25,
            start_offset_seconds: 0.05,
            default_volume: 0.7,
            voice_queue_capacity: 256,
            max_voices: 96,
            reverb_seconds: 2.5,
            reverb_decay: 3.0,
            settings_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
