use std::sync::Arc;

use cpal::{FromSample, Sample};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::config::EngineConfig;
use crate::io::bus::{BusControls, EffectsBus};
use crate::io::clock::AudioClock;
use crate::io::rack::VoiceRack;
use crate::synth::voice::ScheduledVoice;
use crate::MAX_BLOCK_SIZE;

/// Everything the render callback owns: voices, effects, and the clock it
/// advances.
pub struct Renderer {
    rack: VoiceRack,
    bus: EffectsBus,
    clock: AudioClock,
    controls: Arc<BusControls>,
    block: Vec<f32>,
}

/// The engine side of a renderer: where voices go in and come back out.
pub struct OutputPort {
    pub voices: Producer<ScheduledVoice>,
    pub retired: Consumer<ScheduledVoice>,
    pub clock: AudioClock,
    pub controls: Arc<BusControls>,
}

impl OutputPort {
    /// Drops voices the render thread has finished with.
    pub fn collect_retired(&mut self) -> usize {
        let mut count = 0;
        while self.retired.pop().is_ok() {
            count += 1;
        }
        count
    }
}

/// Builds a connected renderer/port pair for one output stream.
pub fn build(config: &EngineConfig, sample_rate: f32) -> (Renderer, OutputPort) {
    let capacity = config.voice_queue_capacity.max(1);
    let (voices_tx, voices_rx) = RingBuffer::new(capacity);
    let (retired_tx, retired_rx) = RingBuffer::new(capacity + config.max_voices);

    let clock = AudioClock::new(sample_rate);
    let controls = Arc::new(BusControls::new(config.default_volume));
    let renderer = Renderer {
        rack: VoiceRack::new(voices_rx, retired_tx, config.max_voices, sample_rate),
        bus: EffectsBus::new(sample_rate, config.reverb_seconds, config.reverb_decay),
        clock: clock.clone(),
        controls: controls.clone(),
        block: vec![0.0; MAX_BLOCK_SIZE],
    };
    let port = OutputPort {
        voices: voices_tx,
        retired: retired_rx,
        clock,
        controls,
    };
    (renderer, port)
}

impl Renderer {
    pub fn clock(&self) -> &AudioClock {
        &self.clock
    }

    pub fn bus(&self) -> &EffectsBus {
        &self.bus
    }

    /// Fills `out` with mono output and advances the clock by its length.
    pub fn render_mono(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk.len());
            chunk.copy_from_slice(&self.block[..chunk.len()]);
        }
    }

    /// Fills an interleaved device buffer, copying the mono mix to every
    /// channel.
    pub fn render_interleaved<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        let channels = channels.max(1);
        for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let frame_count = frames.len() / channels;
            self.render_chunk(frame_count);
            for (frame, &s) in frames.chunks_mut(channels).zip(&self.block[..frame_count]) {
                frame.fill(T::from_sample(s));
            }
        }
    }

    fn render_chunk(&mut self, frames: usize) {
        let block = &mut self.block[..frames];
        block.fill(0.0);
        self.rack.render(self.clock.frames(), block);
        self.bus.process(block, &self.controls);
        self.clock.advance(frames);
    }
}
