//! Session settings that outlive the process. Only the volume is stored.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;

pub const VOLUME_KEY: &str = "lofi_engine.volume";

/// Key/value storage for persisted settings.
///
/// Failures are logged and swallowed: losing a setting must never stop
/// playback.
pub trait VolumeStore: Send {
    fn load(&self, key: &str) -> Option<f32>;

    fn save(&mut self, key: &str, value: f32);
}

/// Settings kept in a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> HashMap<String, f32> {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!("ignoring unreadable settings file {}: {err}", self.path.display());
            HashMap::new()
        })
    }
}

impl VolumeStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<f32> {
        self.read_all().get(key).copied()
    }

    fn save(&mut self, key: &str, value: f32) {
        let mut all = self.read_all();
        all.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(err) = fs::create_dir_all(dir) {
                warn!("cannot create settings directory {}: {err}", dir.display());
                return;
            }
        }
        let result = serde_json::to_string_pretty(&all)
            .map_err(|err| err.to_string())
            .and_then(|text| fs::write(&self.path, text).map_err(|err| err.to_string()));
        if let Err(err) = result {
            warn!("cannot write settings file {}: {err}", self.path.display());
        }
    }
}

/// In-process store; nothing survives the engine.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, f32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VolumeStore for MemoryStore {
    fn load(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }
}
