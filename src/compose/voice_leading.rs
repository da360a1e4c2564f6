//! Pad voice leading.
//!
//! New chord tones are matched one to one against the previous pad notes.
//! Tones are taken in chord order and each claims the free previous voice it
//! can reach with the least movement, in whichever octave of the register
//! lands closest. The result is ordered by the voice each tone continues, so
//! with equal chord sizes `notes[i]` follows `previous[i]`. Tones left over
//! when the new chord is larger stay in root position.
//!
//! Greedy matching can still lose to keeping every voice on its own line, so
//! that placement is computed as well and the cheaper of the two wins.

use crate::compose::theory::fold_into;

pub const PAD_LOW: i32 = 45;
pub const PAD_HIGH: i32 = 69;

/// Root-position placement folded into the pad register.
pub fn root_position(semitones: impl Iterator<Item = i32>) -> Vec<i32> {
    semitones
        .map(|note| fold_into(note, PAD_LOW, PAD_HIGH).unwrap_or(note))
        .collect()
}

struct Placement {
    notes: Vec<i32>,
    movement: i32,
}

/// Places `semitones` near `previous`. Empty history means root position.
pub fn lead_voices(semitones: impl Iterator<Item = i32>, previous: &[i32]) -> Vec<i32> {
    let naive = root_position(semitones);
    if previous.is_empty() {
        return naive;
    }

    let matched = nearest_match(&naive, previous);
    let in_line = in_line(&naive, previous);
    if matched.movement <= in_line.movement {
        matched.notes
    } else {
        in_line.notes
    }
}

fn nearest_match(tones: &[i32], previous: &[i32]) -> Placement {
    let mut lines: Vec<Option<i32>> = vec![None; previous.len()];
    let mut extra = Vec::new();
    let mut movement = 0;

    for &tone in tones {
        let best = previous
            .iter()
            .enumerate()
            .filter(|(line, _)| lines[*line].is_none())
            .map(|(line, &prev)| {
                let note = closest_octave(tone, prev);
                ((note - prev).abs(), line, note)
            })
            .min();
        match best {
            Some((distance, line, note)) => {
                lines[line] = Some(note);
                movement += distance;
            }
            None => extra.push(tone),
        }
    }

    Placement {
        notes: lines.into_iter().flatten().chain(extra).collect(),
        movement,
    }
}

/// Tone `i` follows previous voice `i`.
fn in_line(tones: &[i32], previous: &[i32]) -> Placement {
    let mut movement = 0;
    let notes = tones
        .iter()
        .enumerate()
        .map(|(i, &tone)| match previous.get(i) {
            Some(&prev) => {
                let note = closest_octave(tone, prev);
                movement += (note - prev).abs();
                note
            }
            None => tone,
        })
        .collect();
    Placement { notes, movement }
}

/// The octave of `note` inside the pad register nearest to `target`.
fn closest_octave(note: i32, target: i32) -> i32 {
    let lowest = fold_into(note, PAD_LOW, PAD_LOW + 11).unwrap_or(note);
    (0..)
        .map(|octave| lowest + 12 * octave)
        .take_while(|&candidate| candidate <= PAD_HIGH)
        .min_by_key(|&candidate| ((candidate - target).abs(), candidate))
        .unwrap_or(note)
}

/// Semitones moved when voice `i` goes from `previous[i]` to `notes[i]`.
pub fn movement(notes: &[i32], previous: &[i32]) -> i32 {
    notes
        .iter()
        .zip(previous)
        .map(|(&n, &p)| (n - p).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::theory::ChordQuality;

    fn all_chords() -> Vec<Vec<i32>> {
        let mut chords = Vec::new();
        for root in 45..57 {
            for quality in [ChordQuality::Major, ChordQuality::Minor, ChordQuality::Dominant] {
                for voicing in quality.voicings() {
                    chords.push(voicing.intervals.iter().map(|&i| root + i as i32).collect());
                }
            }
        }
        chords
    }

    fn pitch_classes(notes: &[i32]) -> Vec<i32> {
        let mut classes: Vec<i32> = notes.iter().map(|n| n.rem_euclid(12)).collect();
        classes.sort_unstable();
        classes
    }

    #[test]
    fn voices_stay_in_register() {
        let chords = all_chords();
        let mut previous = Vec::new();
        for chord in chords.iter().cycle().take(200) {
            let placed = lead_voices(chord.iter().copied(), &previous);
            assert_eq!(placed.len(), chord.len());
            assert!(placed.iter().all(|n| (PAD_LOW..=PAD_HIGH).contains(n)));
            assert_eq!(pitch_classes(&placed), pitch_classes(&root_position(chord.iter().copied())));
            previous = placed;
        }
    }

    #[test]
    fn paired_movement_never_exceeds_root_position() {
        let chords = all_chords();
        for from in &chords {
            let previous = root_position(from.iter().copied());
            for to in chords.iter().filter(|to| to.len() == from.len()) {
                let led = lead_voices(to.iter().copied(), &previous);
                let naive = root_position(to.iter().copied());
                assert!(
                    movement(&led, &previous) <= movement(&naive, &previous),
                    "{previous:?} -> {to:?}: led {led:?}, naive {naive:?}"
                );
            }
        }
    }

    #[test]
    fn led_history_keeps_paired_movement_bounded() {
        let chords = all_chords();
        let mut previous = root_position(chords[0].iter().copied());
        for to in chords.iter().cycle().skip(1).take(400) {
            let led = lead_voices(to.iter().copied(), &previous);
            if to.len() == previous.len() {
                let naive = root_position(to.iter().copied());
                assert!(movement(&led, &previous) <= movement(&naive, &previous));
            }
            previous = led;
        }
    }

    #[test]
    fn each_previous_voice_is_claimed_once() {
        // A major triad under D major: root position would move 15 semitones.
        let led = lead_voices([50, 54, 57].into_iter(), &[45, 49, 52]);
        assert_eq!(led, vec![45, 50, 54]);
        assert_eq!(movement(&led, &[45, 49, 52]), 3);

        // Common tones hold, the remaining voice steps down.
        assert_eq!(lead_voices([48, 52, 55].into_iter(), &[57, 60, 64]), vec![55, 60, 64]);
    }

    #[test]
    fn extra_tones_stay_in_root_position() {
        let led = lead_voices([50, 53, 57, 60].into_iter(), &[48, 52, 55]);
        assert_eq!(led, vec![50, 53, 57, 60]);
        let fewer = lead_voices([57, 60, 64].into_iter(), &[45, 48, 52, 55]);
        assert_eq!(fewer.len(), 3);
    }

    #[test]
    fn first_chord_is_root_position() {
        assert_eq!(lead_voices([57, 60, 64].into_iter(), &[]), vec![57, 60, 64]);
        assert_eq!(lead_voices([55, 59, 62, 66, 69].into_iter(), &[]), vec![55, 59, 62, 66, 69]);
    }
}
