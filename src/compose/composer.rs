use std::fmt;

use log::debug;

use crate::compose::chord::{Chord, Key};
use crate::compose::drums::DrumPattern;
use crate::compose::melody;
use crate::compose::note::{Instrument, NoteEvent};
use crate::compose::prng::{Prng, Stream};
use crate::compose::theory::{fold_into, midi_to_freq, ScaleKind, MAX_BPM, MIN_BPM, PROGRESSIONS, ROOT_PALETTE};
use crate::compose::voice_leading::lead_voices;

const BASS_FLOOR_HZ: f32 = 40.0;
const BASS_CEILING_HZ: f32 = 110.0;
const BASS_FIFTH_CHANCE: f64 = 0.25;
const BASS_FOLLOWS_KICK_CHANCE: f64 = 0.3;

const DRONE_LOW: i32 = 36;
const DRONE_HIGH: i32 = 55;
const DRONE_VELOCITY: f32 = 0.1;

const PAD_BEATS: f32 = 4.0;
const BEATS_PER_BAR: u32 = 4;

/// Echo times, in beats: eighth, dotted eighth, quarter.
const DELAY_SUBDIVISIONS: [f64; 3] = [0.5, 0.75, 1.0];

/// Per-session colour of the effects bus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSettings {
    pub cutoff_hz: f32,
    pub delay_seconds: f32,
    pub feedback: f32,
}

/// Everything decided once per pattern generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub bpm: u32,
    pub key: Key,
    pub progression: &'static [usize],
    pub tone: ToneSettings,
}

impl Composition {
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.bpm as f64
    }

    pub fn step_seconds(&self) -> f64 {
        self.beat_seconds() / 4.0
    }

    pub fn bar_seconds(&self) -> f64 {
        self.beat_seconds() * BEATS_PER_BAR as f64
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} bpm", self.key, self.bpm)
    }
}

/// All material for one bar. Notes carry their own step; drums are read
/// step by step from the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPlan {
    pub index: u64,
    pub degree: usize,
    pub chord: Chord,
    pub notes: Vec<NoteEvent>,
    pub drums: DrumPattern,
}

impl BarPlan {
    pub fn notes_at(&self, step: u8) -> impl Iterator<Item = &NoteEvent> {
        self.notes.iter().filter(move |n| n.step == step)
    }

    pub fn notes_for(&self, instrument: Instrument) -> impl Iterator<Item = &NoteEvent> {
        self.notes.iter().filter(move |n| n.instrument == instrument)
    }
}

/// Seeded writer of bars.
///
/// `generate_new_patterns` fixes the key, tempo, progression and tone;
/// `generate_next_bar` then walks the progression one bar per call. Output
/// is a pure function of (seed, variation, call sequence).
pub struct Composer {
    prng: Prng,
    composition: Composition,
    progression_index: usize,
    primed: bool,
    bars_written: u64,
    previous_pads: Vec<i32>,
    drone_due: u64,
}

impl Composer {
    pub fn new(seed: u64) -> Self {
        Self::with_variation(seed, 0)
    }

    pub fn with_variation(seed: u64, variation: u64) -> Self {
        let prng = Prng::new(seed).with_variation(variation);
        let composition = Self::draw_composition(&mut prng.pattern_stream());
        Self {
            prng,
            composition,
            progression_index: 0,
            primed: true,
            bars_written: 0,
            previous_pads: Vec::new(),
            drone_due: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.prng.seed()
    }

    pub fn variation(&self) -> u64 {
        self.prng.variation()
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn bars_written(&self) -> u64 {
        self.bars_written
    }

    /// Switches seed and variation and regenerates.
    pub fn reseed(&mut self, seed: u64, variation: u64) -> &Composition {
        self.prng = Prng::new(seed).with_variation(variation);
        self.generate_new_patterns()
    }

    /// Draws a fresh composition and resets bar, voice-leading and drone
    /// state. Bar 0 is primed on the first progression degree.
    pub fn generate_new_patterns(&mut self) -> &Composition {
        self.composition = Self::draw_composition(&mut self.prng.pattern_stream());
        self.progression_index = 0;
        self.primed = true;
        self.bars_written = 0;
        self.previous_pads.clear();
        self.drone_due = 0;
        debug!("new patterns: {}", self.composition);
        &self.composition
    }

    /// Chord that the next call to `generate_next_bar` will play.
    pub fn upcoming_chord(&self) -> Chord {
        let index = if self.primed {
            self.progression_index
        } else {
            (self.progression_index + 1) % self.composition.progression.len()
        };
        let degree = self.composition.progression[index];
        let mut rng = self.prng.bar_stream(self.bars_written);
        Chord::for_degree(&self.composition.key, degree, &mut rng)
    }

    fn draw_composition(rng: &mut Stream) -> Composition {
        let bpm = rng.between(MIN_BPM, MAX_BPM);
        let root_midi = rng.pick(&ROOT_PALETTE).copied().unwrap_or(ROOT_PALETTE[0]);
        let scale = rng.pick(&ScaleKind::ALL).copied().unwrap_or(ScaleKind::Major);
        let progression = rng.pick(&PROGRESSIONS).copied().unwrap_or(PROGRESSIONS[0]);

        let beat = 60.0 / bpm as f64;
        let cutoff_hz = rng.range(1_400.0, 3_200.0);
        let subdivision = rng
            .pick(&DELAY_SUBDIVISIONS)
            .copied()
            .unwrap_or(DELAY_SUBDIVISIONS[0]);
        let feedback = rng.range(0.25, 0.45);

        Composition {
            bpm,
            key: Key { root_midi, scale },
            progression,
            tone: ToneSettings {
                cutoff_hz,
                delay_seconds: (beat * subdivision) as f32,
                feedback,
            },
        }
    }

    pub fn generate_next_bar(&mut self) -> BarPlan {
        if self.primed {
            self.primed = false;
        } else {
            self.progression_index = (self.progression_index + 1) % self.composition.progression.len();
        }

        let index = self.bars_written;
        let key = self.composition.key;
        let degree = self.composition.progression[self.progression_index];
        let mut rng = self.prng.bar_stream(index);

        let chord = Chord::for_degree(&key, degree, &mut rng);
        let drums = DrumPattern::generate(&mut rng);

        let mut notes = Vec::new();
        notes.push(self.bass(&mut rng, &chord, &drums));
        notes.extend(self.pads(&chord));
        notes.extend(melody::electric_piano(&mut rng, &key, &chord));
        notes.extend(melody::lead_fill(&mut rng, &key, &chord));
        notes.extend(melody::flute_fill(&mut rng, &key, &chord));
        notes.extend(melody::arpeggio(&mut rng, &key, &chord));
        notes.extend(self.drone(&mut rng, index, &key, &chord));

        self.bars_written += 1;
        debug!(
            "bar {index}: {} (degree {degree}), {} notes",
            chord.name(),
            notes.len()
        );

        BarPlan {
            index,
            degree,
            chord,
            notes,
            drums,
        }
    }

    fn pads(&mut self, chord: &Chord) -> Vec<NoteEvent> {
        let placed = lead_voices(chord.semitones(), &self.previous_pads);
        let notes = placed
            .iter()
            .map(|&n| NoteEvent::midi(Instrument::Pad, 0, n, PAD_BEATS, 0.5))
            .collect();
        self.previous_pads = placed;
        notes
    }

    fn bass(&self, rng: &mut Stream, chord: &Chord, drums: &DrumPattern) -> NoteEvent {
        let note = if rng.chance(BASS_FIFTH_CHANCE) {
            chord.root_midi as f32 + 7.0
        } else {
            chord.root_midi as f32
        };
        let frequency = fold_frequency(midi_to_freq(note) / 2.0, BASS_FLOOR_HZ, BASS_CEILING_HZ);

        let step = if rng.chance(BASS_FOLLOWS_KICK_CHANCE) {
            drums.first_offbeat_kick().unwrap_or(0) as u8
        } else {
            0
        };
        // Held until the bar ends, whichever step it starts on.
        let beats = (16 - step) as f32 / 4.0;
        NoteEvent::new(Instrument::Bass, step, frequency, beats, 0.8)
    }

    fn drone(&mut self, rng: &mut Stream, bar: u64, key: &Key, chord: &Chord) -> Option<NoteEvent> {
        if bar < self.drone_due {
            return None;
        }
        let interval = rng.between(2, 4) as u64;
        self.drone_due = bar + interval;

        let root = chord.root_midi as i32;
        let note = [
            root,
            root + 7,
            root + chord.third() as i32,
            key.root_midi as i32,
        ]
        .into_iter()
        .filter(|&n| key.contains(n))
        .find_map(|n| fold_into(n, DRONE_LOW, DRONE_HIGH))
        .unwrap_or(key.root_midi as i32 - 12);

        let beats = (interval * BEATS_PER_BAR as u64) as f32;
        Some(NoteEvent::midi(Instrument::Atmosphere, 0, note, beats, DRONE_VELOCITY))
    }
}

/// Halves or doubles `frequency` until it sits in `floor..=ceiling`.
pub fn fold_frequency(mut frequency: f32, floor: f32, ceiling: f32) -> f32 {
    if !(frequency.is_finite() && frequency > 0.0) {
        return floor;
    }
    while frequency > ceiling {
        frequency /= 2.0;
    }
    while frequency < floor {
        frequency *= 2.0;
    }
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(composer: &mut Composer, count: usize) -> Vec<BarPlan> {
        (0..count).map(|_| composer.generate_next_bar()).collect()
    }

    #[test]
    fn same_seed_same_music() {
        let mut a = Composer::new(42);
        let mut b = Composer::new(42);
        assert_eq!(a.composition(), b.composition());
        assert_eq!(bars(&mut a, 16), bars(&mut b, 16));
    }

    #[test]
    fn different_seeds_diverge() {
        let reference = bars(&mut Composer::new(0), 8);
        let diverging = (1..=5).any(|seed| bars(&mut Composer::new(seed), 8) != reference);
        assert!(diverging);
    }

    #[test]
    fn tempo_stays_in_range() {
        for seed in 0..500 {
            let bpm = Composer::new(seed).composition().bpm;
            assert!((60..=85).contains(&bpm), "seed {seed}: {bpm}");
        }
    }

    #[test]
    fn tone_settings_stay_in_range() {
        for seed in 0..200 {
            let composition = Composer::new(seed).composition().clone();
            let tone = composition.tone;
            assert!((1_400.0..3_200.0).contains(&tone.cutoff_hz));
            assert!((0.25..0.45).contains(&tone.feedback));
            let beats = tone.delay_seconds as f64 / composition.beat_seconds();
            assert!([0.5, 0.75, 1.0].iter().any(|b| (b - beats).abs() < 1e-3));
        }
    }

    #[test]
    fn progression_cycles() {
        let mut composer = Composer::new(2024);
        let len = composer.composition().progression.len();
        let degrees: Vec<usize> = bars(&mut composer, len * 3).iter().map(|b| b.degree).collect();
        for k in 0..len * 2 {
            assert_eq!(degrees[k], degrees[k + len]);
        }
        assert_eq!(degrees[0], composer.composition().progression[0]);
    }

    #[test]
    fn bass_stays_in_register() {
        for seed in 0..100 {
            let mut composer = Composer::new(seed);
            for plan in bars(&mut composer, 12) {
                let bass: Vec<_> = plan.notes_for(Instrument::Bass).collect();
                assert_eq!(bass.len(), 1);
                assert!((40.0..=110.0).contains(&bass[0].frequency));
            }
        }
    }

    #[test]
    fn pads_always_present() {
        for seed in 0..50 {
            let mut composer = Composer::new(seed);
            for plan in bars(&mut composer, 8) {
                let pads = plan.notes_for(Instrument::Pad).count();
                assert_eq!(pads, plan.chord.intervals().len());
            }
        }
    }

    #[test]
    fn drone_returns_every_two_to_four_bars() {
        let mut composer = Composer::new(99);
        let plans = bars(&mut composer, 40);
        let drone_bars: Vec<u64> = plans
            .iter()
            .filter(|p| p.notes_for(Instrument::Atmosphere).count() > 0)
            .map(|p| p.index)
            .collect();
        assert_eq!(drone_bars[0], 0);
        for pair in drone_bars.windows(2) {
            assert!((2..=4).contains(&(pair[1] - pair[0])));
        }
        for plan in &plans {
            for drone in plan.notes_for(Instrument::Atmosphere) {
                assert_eq!(drone.velocity, DRONE_VELOCITY);
                let midi = 69.0 + 12.0 * (drone.frequency / 440.0).log2();
                assert!(midi > 35.99 && midi < 55.01);
            }
        }
    }

    #[test]
    fn regeneration_resets_bar_state() {
        let mut composer = Composer::new(8);
        let first = bars(&mut composer, 3);
        composer.generate_new_patterns();
        assert_eq!(composer.bars_written(), 0);
        assert_eq!(bars(&mut composer, 3), first);
    }

    #[test]
    fn upcoming_chord_matches_next_bar() {
        let mut composer = Composer::new(17);
        for _ in 0..6 {
            let expected = composer.upcoming_chord();
            assert_eq!(composer.generate_next_bar().chord, expected);
        }
    }

    #[test]
    fn variation_changes_the_song() {
        let a = Composer::with_variation(5, 0);
        let b = Composer::with_variation(5, 1);
        let c = Composer::with_variation(5, 2);
        assert!(a.composition() != b.composition() || b.composition() != c.composition());
    }

    #[test]
    fn fold_frequency_edges() {
        assert_eq!(fold_frequency(880.0, 40.0, 110.0), 110.0);
        assert_eq!(fold_frequency(10.0, 40.0, 110.0), 40.0);
        assert_eq!(fold_frequency(f32::NAN, 40.0, 110.0), 40.0);
    }
}
