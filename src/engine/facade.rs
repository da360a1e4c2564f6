use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{info, warn};

use crate::compose::composer::{Composer, Composition};
use crate::config::EngineConfig;
use crate::engine::scheduler::Scheduler;
use crate::engine::status::{PlaybackSnapshot, PlaybackStatus};
use crate::engine::ticker::{Control, SchedulerTask, Ticker};
use crate::error::EngineError;
use crate::io::bus::BusControls;
use crate::io::clock::AudioClock;
use crate::io::device::{CpalOutput, OutputDevice};
use crate::io::persistence::{JsonFileStore, MemoryStore, VolumeStore, VOLUME_KEY};
use crate::io::renderer::OutputPort;
use crate::synth::synthesizer::Synthesizer;

/// The control surface: start, stop, volume and seed.
///
/// Owns every other component. While playing, composition state lives on
/// the scheduler thread; it comes back here on `stop()`.
pub struct Engine<O: OutputDevice = CpalOutput> {
    config: EngineConfig,
    output: O,
    task: Option<SchedulerTask>,
    ticker: Option<Ticker>,
    clock: AudioClock,
    controls: Arc<BusControls>,
    status: Arc<PlaybackStatus>,
    store: Box<dyn VolumeStore>,
    seed: u64,
    variation: u64,
    volume: f32,
}

impl Engine<CpalOutput> {
    /// Opens the default audio output.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let (output, port) = CpalOutput::open(&config)?;
        let store: Box<dyn VolumeStore> = match &config.settings_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::with_output(config, store, output, port))
    }
}

impl<O: OutputDevice> Engine<O> {
    /// `port` must be the one created together with `output`.
    pub fn with_output(
        config: EngineConfig,
        store: Box<dyn VolumeStore>,
        output: O,
        port: OutputPort,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let volume = store
            .load(VOLUME_KEY)
            .filter(|v| v.is_finite())
            .unwrap_or(config.default_volume)
            .clamp(0.0, 1.0);

        let clock = port.clock.clone();
        let controls = port.controls.clone();
        controls.set_volume(volume);
        controls.set_muted(true);

        let status = Arc::new(PlaybackStatus::new());
        let composer = Composer::new(seed);
        status.set_composition(composer.composition());

        let task = SchedulerTask {
            composer,
            scheduler: Scheduler::new(config.lookahead_seconds),
            synth: Synthesizer::new(output.sample_rate()),
            port,
            status: status.clone(),
        };

        info!("engine ready, seed {seed}, volume {volume:.2}");
        Self {
            config,
            output,
            task: Some(task),
            ticker: None,
            clock,
            controls,
            status,
            store,
            seed,
            variation: 0,
            volume,
        }
    }

    /// Resumes the output, regenerates patterns from the current seed and
    /// starts the scheduler. Does nothing if already playing.
    ///
    /// If the output cannot be activated the engine stays idle.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.ticker.is_some() {
            return Ok(());
        }
        let mut task = self.task.take().ok_or(EngineError::SchedulerLost)?;

        if let Err(err) = self.output.resume() {
            warn!("cannot start playback: {err}");
            self.task = Some(task);
            return Err(err);
        }

        let composition = task.composer.reseed(self.seed, self.variation);
        self.controls.apply_tone(&composition.tone);
        self.status.set_composition(composition);
        info!("starting: {composition}, seed {}", self.seed);

        task.scheduler
            .reset(self.clock.now() + self.config.start_offset_seconds);
        self.status.set_position(0, 0);
        self.controls.set_muted(false);
        self.status.set_playing(true);

        let interval = Duration::from_millis(self.config.tick_interval_ms.max(1));
        match Ticker::spawn(task, interval) {
            Ok(ticker) => {
                self.ticker = Some(ticker);
                Ok(())
            }
            Err((err, task)) => {
                self.controls.set_muted(true);
                self.status.set_playing(false);
                self.task = task;
                Err(err)
            }
        }
    }

    /// Stops the scheduler and ramps the output to silence. Voices already
    /// handed to the output play out underneath the ramp.
    pub fn stop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        self.controls.set_muted(true);
        self.task = ticker.stop();
        self.status.set_playing(false);
        info!("stopped");
    }

    pub fn is_playing(&self) -> bool {
        self.ticker.is_some()
    }

    /// Clamped to `[0, 1]`; NaN is ignored. Persisted immediately.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.controls.set_volume(self.volume);
        self.store.save(VOLUME_KEY, self.volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn variation(&self) -> u64 {
        self.variation
    }

    /// Switches to `seed`. While playing this is a full stop and start, so
    /// harmony restarts from bar 0 of the new seed.
    pub fn set_seed(&mut self, seed: u64) -> Result<(), EngineError> {
        let was_playing = self.is_playing();
        self.stop();

        self.seed = seed;
        self.variation = 0;
        if let Some(task) = self.task.as_mut() {
            let composition = task.composer.reseed(seed, 0);
            self.status.set_composition(composition);
        }
        info!("seed set to {seed}");

        if was_playing {
            self.start()?;
        }
        Ok(())
    }

    /// Fresh material from the same seed without touching play state.
    pub fn generate_new_patterns(&mut self) {
        self.variation += 1;
        match (&self.ticker, self.task.as_mut()) {
            (Some(ticker), _) => ticker.send(Control::Regenerate {
                variation: self.variation,
            }),
            (None, Some(task)) => {
                let composition = task.composer.reseed(self.seed, self.variation);
                self.status.set_composition(composition);
            }
            (None, None) => {}
        }
    }

    /// Stops playback and lets go of the output device.
    pub fn cleanup(&mut self) {
        self.stop();
        self.output.release();
    }

    pub fn status(&self) -> PlaybackSnapshot {
        self.status.snapshot(self.seed, self.variation, self.volume)
    }

    /// Current composition; only available while idle.
    pub fn composition(&self) -> Option<&Composition> {
        self.task.as_ref().map(|task| task.composer.composition())
    }

    pub fn clock(&self) -> &AudioClock {
        &self.clock
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<O: OutputDevice> Drop for Engine<O> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
