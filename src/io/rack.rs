use rtrb::{Consumer, Producer};

use crate::synth::voice::ScheduledVoice;
use crate::MAX_BLOCK_SIZE;

/// Render-thread owner of every sounding voice.
///
/// Voices arrive fully built through `incoming`; finished ones are handed
/// back through `retired` so their graphs are freed off the render thread.
pub struct VoiceRack {
    incoming: Consumer<ScheduledVoice>,
    retired: Producer<ScheduledVoice>,
    voices: Vec<ScheduledVoice>,
    max_voices: usize,
    scratch: Vec<f32>,
    sample_rate: f32,
}

impl VoiceRack {
    pub fn new(
        incoming: Consumer<ScheduledVoice>,
        retired: Producer<ScheduledVoice>,
        max_voices: usize,
        sample_rate: f32,
    ) -> Self {
        let max_voices = max_voices.max(1);
        Self {
            incoming,
            retired,
            voices: Vec::with_capacity(max_voices),
            max_voices,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate,
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Adds every voice's output for `block_start..block_start + out.len()`
    /// into `out`. `out` must not exceed `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, block_start: u64, out: &mut [f32]) {
        while self.voices.len() < self.max_voices {
            match self.incoming.pop() {
                Ok(voice) => self.voices.push(voice),
                Err(_) => break,
            }
        }

        let scratch = &mut self.scratch[..out.len()];
        for voice in self.voices.iter_mut() {
            voice.render_into(block_start, out, scratch, self.sample_rate);
        }

        let mut i = 0;
        while i < self.voices.len() {
            if self.voices[i].is_finished() && self.retired.slots() > 0 {
                let voice = self.voices.swap_remove(i);
                // Room was checked above.
                let _ = self.retired.push(voice);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::envelope::EnvNode;
    use crate::graph::extensions::NodeExt;
    use crate::graph::oscillator::OscNode;
    use rtrb::RingBuffer;

    fn tone(start: u64, release: u64, stop: u64) -> ScheduledVoice {
        let graph = OscNode::sine().amplify(EnvNode::adsr(0.0, 0.0, 1.0, 0.0));
        ScheduledVoice::new(Box::new(graph), 440.0, 1.0, 1.0, start, release, stop)
    }

    #[test]
    fn voices_start_on_their_frame() {
        let (mut tx, rx) = RingBuffer::new(8);
        let (retired_tx, _retired_rx) = RingBuffer::new(8);
        let mut rack = VoiceRack::new(rx, retired_tx, 8, 48_000.0);

        assert!(tx.push(tone(100, 1_000, 1_100)).is_ok());
        let mut out = vec![0.0f32; 256];
        rack.render(0, &mut out);

        assert!(out[..100].iter().all(|&s| s == 0.0));
        assert!(out[100..].iter().any(|&s| s != 0.0));
        assert_eq!(rack.active_voices(), 1);
    }

    #[test]
    fn finished_voices_are_retired() {
        let (mut tx, rx) = RingBuffer::new(8);
        let (retired_tx, mut retired_rx) = RingBuffer::new(8);
        let mut rack = VoiceRack::new(rx, retired_tx, 8, 48_000.0);

        assert!(tx.push(tone(0, 64, 128)).is_ok());
        let mut out = vec![0.0f32; 256];
        rack.render(0, &mut out);

        assert_eq!(rack.active_voices(), 0);
        assert!(retired_rx.pop().is_ok());
    }

    #[test]
    fn voice_cap_leaves_extra_voices_queued() {
        let (mut tx, rx) = RingBuffer::new(8);
        let (retired_tx, _retired_rx) = RingBuffer::new(8);
        let mut rack = VoiceRack::new(rx, retired_tx, 2, 48_000.0);

        for _ in 0..3 {
            assert!(tx.push(tone(0, 10_000, 20_000)).is_ok());
        }
        let mut out = vec![0.0f32; 64];
        rack.render(0, &mut out);
        assert_eq!(rack.active_voices(), 2);
        assert_eq!(tx.slots(), 7);
    }
}
