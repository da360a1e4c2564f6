use log::warn;

use crate::compose::note::{DrumKind, NoteEvent};
use crate::synth::instrument::{drum_profile, profile, DurationMode};
use crate::synth::voice::{ScheduledVoice, VoiceSink};

/// Extra time after the envelope's nominal end before a voice is dropped.
pub const STOP_TAIL_SECONDS: f64 = 0.05;

/// Absolute audio-clock times of one voice, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceTiming {
    pub start: f64,
    pub release: f64,
    pub stop: f64,
}

/// Turns note and drum descriptors into scheduled voices.
///
/// Holds no per-note state: every call builds a fresh graph, pins it to
/// absolute frames and hands it to the sink.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer {
    sample_rate: f32,
}

impl Synthesizer {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frame_at(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * self.sample_rate as f64).round() as u64
    }

    pub fn note_timing(&self, note: &NoteEvent, time: f64, beat_seconds: f64) -> VoiceTiming {
        let profile = profile(note.instrument);
        let shape = note.envelope.unwrap_or(profile.shape);
        let attack = shape.attack as f64;
        let release_time = shape.release as f64;
        let length = note.duration_beats.max(0.0) as f64 * beat_seconds;

        let release = match profile.duration {
            DurationMode::UntilRelease => time + length,
            DurationMode::Total => (time + attack).max(time + length - release_time),
        };
        VoiceTiming {
            start: time,
            release,
            stop: release + release_time + STOP_TAIL_SECONDS,
        }
    }

    /// `false` when nothing was scheduled (silent note or full queue).
    pub fn schedule_note(
        &self,
        note: &NoteEvent,
        time: f64,
        beat_seconds: f64,
        sink: &mut impl VoiceSink,
    ) -> bool {
        if !(note.velocity > 0.0) || !(note.frequency.is_finite() && note.frequency > 0.0) {
            return false;
        }

        let profile = profile(note.instrument);
        let shape = note.envelope.unwrap_or(profile.shape);
        let graph = profile.build(shape, note.waveform.unwrap_or(profile.waveform));
        let timing = self.note_timing(note, time, beat_seconds);

        let voice = ScheduledVoice::new(
            graph,
            note.frequency,
            note.velocity,
            profile.gain * note.velocity.min(1.0),
            self.frame_at(timing.start),
            self.frame_at(timing.release),
            self.frame_at(timing.stop),
        );
        self.submit(sink, voice, note.instrument.name())
    }

    pub fn schedule_drum(
        &self,
        kind: DrumKind,
        time: f64,
        velocity: f32,
        sink: &mut impl VoiceSink,
    ) -> bool {
        if !(velocity > 0.0) {
            return false;
        }

        let profile = drum_profile(kind);
        let release = time + profile.hold as f64;
        let stop = release + profile.release as f64 + STOP_TAIL_SECONDS;

        let voice = ScheduledVoice::new(
            profile.build(),
            0.0,
            velocity,
            profile.gain * velocity.min(1.0),
            self.frame_at(time),
            self.frame_at(release),
            self.frame_at(stop),
        );
        self.submit(sink, voice, "drum")
    }

    fn submit(&self, sink: &mut impl VoiceSink, voice: ScheduledVoice, what: &str) -> bool {
        match sink.submit(voice) {
            Ok(()) => true,
            Err(_dropped) => {
                warn!("voice queue full, dropping {what} voice");
                false
            }
        }
    }
}
