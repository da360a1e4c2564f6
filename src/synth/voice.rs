use rtrb::{Producer, PushError};

use crate::graph::node::{GraphNode, RenderCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Pending,   // Waiting for its start frame
    Active,    // Gate open
    Releasing, // Gate closed, envelope tail running
    Finished,  // Silent; ready to be retired
}

/// A voice graph pinned to absolute frames on the audio clock.
///
/// Built off the render thread and handed over complete; the rack only
/// renders it and flips the gate at `start_frame` and `release_frame`.
pub struct ScheduledVoice {
    graph: Box<dyn GraphNode>,
    frequency: f32,
    velocity: f32,
    gain: f32,
    start_frame: u64,
    release_frame: u64,
    stop_frame: u64,
    state: VoiceState,
}

impl ScheduledVoice {
    pub fn new(
        graph: Box<dyn GraphNode>,
        frequency: f32,
        velocity: f32,
        gain: f32,
        start_frame: u64,
        release_frame: u64,
        stop_frame: u64,
    ) -> Self {
        Self {
            graph,
            frequency,
            velocity,
            gain,
            start_frame,
            release_frame: release_frame.max(start_frame),
            stop_frame: stop_frame.max(start_frame + 1),
            state: VoiceState::Pending,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn release_frame(&self) -> u64 {
        self.release_frame
    }

    pub fn stop_frame(&self) -> u64 {
        self.stop_frame
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == VoiceState::Finished
    }

    /// Adds this voice's contribution for the frames
    /// `block_start..block_start + out.len()` into `out`, splitting the block
    /// at the start and release frames. `scratch` must be at least as long
    /// as `out`.
    pub fn render_into(&mut self, block_start: u64, out: &mut [f32], scratch: &mut [f32], sample_rate: f32) {
        let block_end = block_start + out.len() as u64;
        if self.state == VoiceState::Finished || self.start_frame >= block_end {
            return;
        }

        let ctx = RenderCtx::from_freq(sample_rate, self.frequency, self.velocity);
        if self.state == VoiceState::Pending {
            self.graph.note_on(&ctx);
            self.state = VoiceState::Active;
        }

        let end = self.stop_frame.min(block_end);
        let mut cursor = self.start_frame.max(block_start);
        while cursor < end {
            if self.state == VoiceState::Active && cursor >= self.release_frame {
                self.graph.note_off(&ctx);
                self.state = VoiceState::Releasing;
            }
            let segment_end = match self.state {
                VoiceState::Active => end.min(self.release_frame),
                _ => end,
            };

            let lo = (cursor - block_start) as usize;
            let hi = (segment_end - block_start) as usize;
            let segment = &mut scratch[lo..hi];
            segment.fill(0.0);
            self.graph.render_block(segment, &ctx);
            for (o, s) in out[lo..hi].iter_mut().zip(segment.iter()) {
                *o += s * self.gain;
            }
            cursor = segment_end;
        }

        let gate_closed = self.state == VoiceState::Releasing && !self.graph.is_active();
        if block_end >= self.stop_frame || gate_closed {
            self.state = VoiceState::Finished;
        }
    }
}

/// Anything that accepts finished voices from the synthesizer.
pub trait VoiceSink {
    /// Hands the voice back if there is no room for it.
    fn submit(&mut self, voice: ScheduledVoice) -> Result<(), ScheduledVoice>;
}

impl VoiceSink for Vec<ScheduledVoice> {
    fn submit(&mut self, voice: ScheduledVoice) -> Result<(), ScheduledVoice> {
        self.push(voice);
        Ok(())
    }
}

impl VoiceSink for Producer<ScheduledVoice> {
    fn submit(&mut self, voice: ScheduledVoice) -> Result<(), ScheduledVoice> {
        self.push(voice).map_err(|PushError::Full(voice)| voice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    fn square_voice(start: u64, release: u64, stop: u64) -> ScheduledVoice {
        let graph = OscNode::square().amplify(EnvNode::adsr(0.0001, 0.0001, 1.0, 0.0001));
        ScheduledVoice::new(Box::new(graph), 100.0, 1.0, 1.0, start, release, stop)
    }

    #[test]
    fn starts_on_its_frame_inside_a_block() {
        let mut voice = square_voice(100, 1_000, 2_000);
        let mut out = vec![0.0f32; 256];
        let mut scratch = vec![0.0f32; 256];
        voice.render_into(0, &mut out, &mut scratch, 48_000.0);

        assert!(out[..100].iter().all(|&s| s == 0.0));
        assert!(out[100..].iter().any(|&s| s != 0.0));
        assert_eq!(voice.state(), VoiceState::Active);
    }

    #[test]
    fn future_voice_is_untouched() {
        let mut voice = square_voice(5_000, 6_000, 7_000);
        let mut out = vec![0.0f32; 256];
        let mut scratch = vec![0.0f32; 256];
        voice.render_into(0, &mut out, &mut scratch, 48_000.0);
        assert_eq!(voice.state(), VoiceState::Pending);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn releases_mid_block_and_finishes() {
        let mut voice = square_voice(0, 128, 4_096);
        let mut out = vec![0.0f32; 256];
        let mut scratch = vec![0.0f32; 256];
        voice.render_into(0, &mut out, &mut scratch, 48_000.0);
        assert!(out[64..120].iter().any(|&s| s.abs() > 0.5));
        assert!(out[140..].iter().all(|&s| s.abs() < 1e-6));
        assert!(voice.is_finished());
    }

    #[test]
    fn stop_frame_is_a_hard_limit() {
        let mut voice = square_voice(0, 10_000, 300);
        let mut out = vec![0.0f32; 512];
        let mut scratch = vec![0.0f32; 512];
        voice.render_into(0, &mut out, &mut scratch, 48_000.0);
        assert!(voice.is_finished());
        assert!(out[300..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn full_queue_returns_the_voice() {
        let (mut producer, _consumer) = rtrb::RingBuffer::new(1);
        assert!(producer.submit(square_voice(0, 1, 2)).is_ok());
        assert!(producer.submit(square_voice(0, 1, 2)).is_err());
    }
}
