use std::fmt;

use crate::compose::prng::Stream;
use crate::compose::theory::{midi_to_freq, note_name, ChordQuality, ScaleKind, Voicing};

const SIMPLE_VOICING_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub root_midi: u8,
    pub scale: ScaleKind,
}

impl Key {
    pub fn root_frequency(&self) -> f32 {
        midi_to_freq(self.root_midi as f32)
    }

    /// Semitones above the key root for a scale degree, wrapping past the
    /// last scale step into the next octave.
    pub fn degree_interval(&self, degree: usize) -> u8 {
        let steps = self.scale.intervals();
        steps[degree % steps.len()] + 12 * (degree / steps.len()) as u8
    }

    /// Whether `midi` belongs to the key, any octave.
    pub fn contains(&self, midi: i32) -> bool {
        self.scale.contains(midi - self.root_midi as i32)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", note_name(self.root_midi as i32), self.scale.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub root_midi: u8,
    pub quality: ChordQuality,
    pub voicing: &'static Voicing,
}

impl Chord {
    /// Diatonic chord on `degree` with a randomly chosen voicing. The root
    /// stays within the octave above the key root.
    pub fn for_degree(key: &Key, degree: usize, rng: &mut Stream) -> Self {
        let interval = key.degree_interval(degree) % 12;
        let quality = ChordQuality::for_degree(key.scale, interval);
        let voicings = quality.voicings();

        let voicing = if rng.chance(SIMPLE_VOICING_CHANCE) {
            let simple: Vec<&'static Voicing> = voicings.iter().filter(|v| v.simple).collect();
            rng.pick(&simple).copied()
        } else {
            rng.pick(voicings)
        };

        match voicing {
            Some(voicing) => Self {
                root_midi: key.root_midi + interval,
                quality,
                voicing,
            },
            None => Self::tonic_triad(key),
        }
    }

    pub fn tonic_triad(key: &Key) -> Self {
        Self {
            root_midi: key.root_midi,
            quality: ChordQuality::Major,
            voicing: &ChordQuality::Major.voicings()[0],
        }
    }

    pub fn root_frequency(&self) -> f32 {
        midi_to_freq(self.root_midi as f32)
    }

    pub fn intervals(&self) -> &'static [u8] {
        self.voicing.intervals
    }

    /// Root-position MIDI notes of the voicing.
    pub fn semitones(&self) -> impl Iterator<Item = i32> + '_ {
        self.voicing
            .intervals
            .iter()
            .map(move |&i| self.root_midi as i32 + i as i32)
    }

    pub fn contains_pitch_class(&self, midi: i32) -> bool {
        let rel = (midi - self.root_midi as i32).rem_euclid(12) as u8;
        self.voicing.intervals.iter().any(|&i| i % 12 == rel)
    }

    /// Semitones from root to third: 3 for minor chords, 4 otherwise.
    pub fn third(&self) -> u8 {
        match self.quality {
            ChordQuality::Minor => 3,
            ChordQuality::Major | ChordQuality::Dominant => 4,
        }
    }

    pub fn name(&self) -> String {
        format!("{}{}", note_name(self.root_midi as i32), self.voicing.suffix)
    }
}
