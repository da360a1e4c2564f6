//! Melodic and comping parts: electric-piano stabs, lead and flute fills,
//! arpeggio. Each part draws only from the bar stream it is handed.

use crate::compose::chord::{Chord, Key};
use crate::compose::note::{Instrument, NoteEvent};
use crate::compose::prng::Stream;
use crate::compose::theory::fold_into;
use crate::dsp::Waveform;

pub const MELODY_LOW: i32 = 60;
pub const MELODY_HIGH: i32 = 84;
pub const EPIANO_LOW: i32 = 55;
pub const EPIANO_HIGH: i32 = 76;
const ARP_HIGH: i32 = 79;

const CHORD_TONE_PREFERENCE: f64 = 0.7;
const EPIANO_CHANCE: f64 = 0.6;
const LEAD_CHANCE: f64 = 0.35;
const FLUTE_CHANCE: f64 = 0.2;
const ARP_CHANCE: f64 = 0.4;

const EPIANO_STEPS: [u8; 7] = [0, 4, 6, 8, 10, 12, 14];

/// Notes a part may pick from inside one register.
#[derive(Debug, Clone)]
pub struct Pool {
    chord_tones: Vec<i32>,
    scale_tones: Vec<i32>,
    fallback: i32,
}

impl Pool {
    /// Non-chord scale tones a minor second or a tritone above the chord
    /// root are left out.
    pub fn new(key: &Key, chord: &Chord, low: i32, high: i32) -> Self {
        let root = chord.root_midi as i32;
        let chord_tones = (low..=high)
            .filter(|&n| chord.contains_pitch_class(n))
            .collect();
        let scale_tones = (low..=high)
            .filter(|&n| key.contains(n) && !chord.contains_pitch_class(n))
            .filter(|&n| !matches!((n - root).rem_euclid(12), 1 | 6))
            .collect();
        let fallback = fold_into(root, low, high)
            .or_else(|| fold_into(key.root_midi as i32, low, high))
            .unwrap_or_else(|| nearest_octave(root, low, high));

        Self {
            chord_tones,
            scale_tones,
            fallback,
        }
    }

    pub fn chord_tones(&self) -> &[i32] {
        &self.chord_tones
    }

    pub fn scale_tones(&self) -> &[i32] {
        &self.scale_tones
    }

    pub fn choose(&self, rng: &mut Stream) -> i32 {
        let picked = if rng.chance(CHORD_TONE_PREFERENCE) {
            rng.pick(&self.chord_tones)
                .or_else(|| rng.pick(&self.scale_tones))
        } else {
            rng.pick(&self.scale_tones)
                .or_else(|| rng.pick(&self.chord_tones))
        };
        picked.copied().unwrap_or(self.fallback)
    }
}

/// The octave of `note` closest to a register too narrow to hold it.
fn nearest_octave(note: i32, low: i32, high: i32) -> i32 {
    let above = fold_into(note, low, low + 11).unwrap_or(note);
    let below = above - 12;
    if above - high <= low - below {
        above
    } else {
        below
    }
}

/// Sixteenth steps already taken by one part in the current bar.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepSet(u16);

impl StepSet {
    /// `false` if the step was already taken.
    pub fn insert(&mut self, step: u8) -> bool {
        let bit = 1u16 << (step % 16);
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }
}

/// `count` distinct steps out of `candidates`, in ascending order.
fn distinct_steps(rng: &mut Stream, candidates: &[u8], count: usize) -> Vec<u8> {
    let mut remaining = candidates.to_vec();
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count && !remaining.is_empty() {
        chosen.push(remaining.remove(rng.below(remaining.len())));
    }
    chosen.sort_unstable();
    chosen
}

/// One or two stabs of two or three adjacent chord tones. A stab is a single
/// event on its step; two stabs never share one.
pub fn electric_piano(rng: &mut Stream, key: &Key, chord: &Chord) -> Vec<NoteEvent> {
    if !rng.chance(EPIANO_CHANCE) {
        return Vec::new();
    }

    let pool = Pool::new(key, chord, EPIANO_LOW, EPIANO_HIGH);
    let stab_count = 1 + rng.below(2);
    let mut used = StepSet::default();
    let mut notes = Vec::new();

    for _ in 0..stab_count {
        let Some(&step) = rng.pick(&EPIANO_STEPS) else {
            continue;
        };
        if !used.insert(step) {
            continue;
        }

        let size = 2 + rng.below(2);
        let tones = pool.chord_tones();
        let stab: Vec<i32> = if tones.len() >= size {
            let start = rng.below(tones.len() - size + 1);
            tones[start..start + size].to_vec()
        } else {
            vec![pool.choose(rng)]
        };

        let duration = if rng.chance(0.5) { 1.0 } else { 0.5 };
        let velocity = rng.range(0.45, 0.7);
        notes.extend(
            stab.into_iter()
                .map(|n| NoteEvent::midi(Instrument::ElectricPiano, step, n, duration, velocity)),
        );
    }
    notes
}

/// Two to four notes in the second half of the bar.
pub fn lead_fill(rng: &mut Stream, key: &Key, chord: &Chord) -> Vec<NoteEvent> {
    if !rng.chance(LEAD_CHANCE) {
        return Vec::new();
    }

    let pool = Pool::new(key, chord, MELODY_LOW, MELODY_HIGH);
    let waveform = if rng.chance(0.3) {
        Waveform::Square
    } else {
        Waveform::Triangle
    };
    let count = 2 + rng.below(3);
    let candidates: Vec<u8> = (8..16).collect();

    distinct_steps(rng, &candidates, count)
        .into_iter()
        .map(|step| {
            let note = pool.choose(rng);
            let velocity = rng.range(0.35, 0.55);
            NoteEvent::midi(Instrument::Lead, step, note, 0.5, velocity).with_waveform(waveform)
        })
        .collect()
}

/// One to three long notes on beats 2, 3 and 4.
pub fn flute_fill(rng: &mut Stream, key: &Key, chord: &Chord) -> Vec<NoteEvent> {
    if !rng.chance(FLUTE_CHANCE) {
        return Vec::new();
    }

    let pool = Pool::new(key, chord, MELODY_LOW, MELODY_HIGH);
    let count = 1 + rng.below(3);

    distinct_steps(rng, &[4, 8, 12], count)
        .into_iter()
        .map(|step| {
            let note = pool.choose(rng);
            NoteEvent::midi(Instrument::Flute, step, note, 1.5, rng.range(0.3, 0.45))
        })
        .collect()
}

/// Eighth-note walk up the chord tones, occasionally leaving a gap.
pub fn arpeggio(rng: &mut Stream, key: &Key, chord: &Chord) -> Vec<NoteEvent> {
    if !rng.chance(ARP_CHANCE) {
        return Vec::new();
    }

    let pool = Pool::new(key, chord, MELODY_LOW, ARP_HIGH);
    let tones: Vec<i32> = if pool.chord_tones().is_empty() {
        vec![pool.choose(rng)]
    } else {
        pool.chord_tones().iter().copied().take(5).collect()
    };
    let descending = rng.chance(0.3);

    (0..8u8)
        .filter_map(|i| {
            if rng.chance(0.15) {
                return None;
            }
            let idx = i as usize % tones.len();
            let note = if descending {
                tones[tones.len() - 1 - idx]
            } else {
                tones[idx]
            };
            Some(NoteEvent::midi(Instrument::Arp, i * 2, note, 0.5, 0.4))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::prng::Prng;
    use crate::compose::theory::ScaleKind;

    fn a_minor() -> (Key, Chord) {
        let key = Key {
            root_midi: 45,
            scale: ScaleKind::NaturalMinor,
        };
        let chord = Chord::tonic_triad(&key);
        (key, chord)
    }

    #[test]
    fn pool_skips_dissonant_scale_tones() {
        let key = Key {
            root_midi: 48,
            scale: ScaleKind::Lydian,
        };
        let mut rng = Prng::new(0).bar_stream(0);
        let chord = Chord::for_degree(&key, 0, &mut rng);
        let pool = Pool::new(&key, &chord, MELODY_LOW, MELODY_HIGH);
        // F# is in C lydian but a tritone over C.
        assert!(pool.scale_tones().iter().all(|n| n % 12 != 6));
        assert!(pool.chord_tones().iter().all(|&n| chord.contains_pitch_class(n)));
    }

    #[test]
    fn empty_register_still_yields_a_note() {
        let (key, chord) = a_minor();
        // Eb is neither in A minor nor in the chord.
        let pool = Pool::new(&key, &chord, 63, 63);
        assert!(pool.chord_tones().is_empty());
        assert!(pool.scale_tones().is_empty());
        let mut rng = Prng::new(1).bar_stream(0);
        // Falls back to the chord root in the octave nearest the register.
        let note = pool.choose(&mut rng);
        assert_eq!(note, 69);
        assert_eq!((note - chord.root_midi as i32).rem_euclid(12), 0);

        let low_pool = Pool::new(&key, &chord, 58, 58);
        assert_eq!(low_pool.choose(&mut rng), 57);
    }

    #[test]
    fn parts_never_double_up_a_step() {
        let (key, _) = a_minor();
        for bar in 0..300 {
            let mut rng = Prng::new(11).bar_stream(bar);
            let chord = Chord::for_degree(&key, bar as usize % 7, &mut rng);
            for part in [lead_fill, flute_fill, arpeggio] {
                let notes = part(&mut rng, &key, &chord);
                let mut steps = StepSet::default();
                assert!(notes.iter().all(|n| steps.insert(n.step)));
            }
            let stabs = electric_piano(&mut rng, &key, &chord);
            assert!(stabs.len() <= 6);
        }
    }

    #[test]
    fn parts_stay_in_register_and_window() {
        let (key, chord) = a_minor();
        for bar in 0..300 {
            let mut rng = Prng::new(5).bar_stream(bar);
            for note in lead_fill(&mut rng, &key, &chord) {
                assert!((8..16).contains(&note.step));
                assert_eq!(note.instrument, Instrument::Lead);
            }
            for note in flute_fill(&mut rng, &key, &chord) {
                assert!([4, 8, 12].contains(&note.step));
            }
            for note in electric_piano(&mut rng, &key, &chord) {
                let midi = 69.0 + 12.0 * (note.frequency / 440.0).log2();
                assert!(midi > EPIANO_LOW as f32 - 0.01 && midi < EPIANO_HIGH as f32 + 0.01);
            }
        }
    }
}
