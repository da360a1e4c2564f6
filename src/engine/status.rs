use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Mutex;

use crate::compose::composer::{BarPlan, Composition};

/// Written by the scheduler thread, read by whoever polls the engine.
#[derive(Debug, Default)]
pub struct PlaybackStatus {
    playing: AtomicBool,
    step: AtomicU8,
    bar_count: AtomicU64,
    now_playing: Mutex<NowPlaying>,
}

#[derive(Debug, Default, Clone)]
struct NowPlaying {
    bpm: u32,
    key: String,
    chord: Option<String>,
}

/// Point-in-time view of the engine for UIs and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub seed: u64,
    pub variation: u64,
    pub volume: f32,
    pub bpm: u32,
    pub key: String,
    pub chord: Option<String>,
    pub step: u8,
    pub bar_count: u64,
}

impl PlaybackStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
    }

    pub fn set_position(&self, step: u8, bar_count: u64) {
        self.step.store(step, Ordering::Relaxed);
        self.bar_count.store(bar_count, Ordering::Relaxed);
    }

    pub fn set_composition(&self, composition: &Composition) {
        let mut now = self.lock();
        now.bpm = composition.bpm;
        now.key = composition.key.to_string();
        now.chord = None;
    }

    pub fn set_bar(&self, bar: &BarPlan) {
        self.lock().chord = Some(bar.chord.name());
    }

    pub fn snapshot(&self, seed: u64, variation: u64, volume: f32) -> PlaybackSnapshot {
        let now = self.lock().clone();
        PlaybackSnapshot {
            is_playing: self.is_playing(),
            seed,
            variation,
            volume,
            bpm: now.bpm,
            key: now.key,
            chord: now.chord,
            step: self.step.load(Ordering::Relaxed),
            bar_count: self.bar_count.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NowPlaying> {
        // A panicked writer leaves plain strings behind; still readable.
        self.now_playing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
