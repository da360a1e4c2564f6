//! Scales, voicings, progressions and pitch helpers.

/// Key roots: A2, Bb2, C3, D3, Eb3, F3, G3.
pub const ROOT_PALETTE: [u8; 7] = [45, 46, 48, 50, 51, 53, 55];

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 85;

const NOTE_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    Dorian,
    Mixolydian,
    Lydian,
    PentatonicMajor,
    PentatonicMinor,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 7] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::Dorian,
        ScaleKind::Mixolydian,
        ScaleKind::Lydian,
        ScaleKind::PentatonicMajor,
        ScaleKind::PentatonicMinor,
    ];

    /// Semitones above the root, ascending, starting at 0.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleKind::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleKind::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleKind::PentatonicMajor => &[0, 2, 4, 7, 9],
            ScaleKind::PentatonicMinor => &[0, 3, 5, 7, 10],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::NaturalMinor => "minor",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Lydian => "lydian",
            ScaleKind::PentatonicMajor => "major pentatonic",
            ScaleKind::PentatonicMinor => "minor pentatonic",
        }
    }

    /// `interval` is taken relative to the scale root, any octave.
    pub fn contains(self, interval: i32) -> bool {
        let pc = interval.rem_euclid(12) as u8;
        self.intervals().contains(&pc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Voicing {
    pub suffix: &'static str,
    pub intervals: &'static [u8],
    /// Triads and sixths; picked preferentially for a sparser sound.
    pub simple: bool,
}

const MAJOR_VOICINGS: [Voicing; 4] = [
    Voicing { suffix: "", intervals: &[0, 4, 7], simple: true },
    Voicing { suffix: "6", intervals: &[0, 4, 7, 9], simple: true },
    Voicing { suffix: "maj7", intervals: &[0, 4, 7, 11], simple: false },
    Voicing { suffix: "maj9", intervals: &[0, 4, 7, 11, 14], simple: false },
];

const MINOR_VOICINGS: [Voicing; 4] = [
    Voicing { suffix: "m", intervals: &[0, 3, 7], simple: true },
    Voicing { suffix: "m6", intervals: &[0, 3, 7, 9], simple: true },
    Voicing { suffix: "m7", intervals: &[0, 3, 7, 10], simple: false },
    Voicing { suffix: "m9", intervals: &[0, 3, 7, 10, 14], simple: false },
];

const DOMINANT_VOICINGS: [Voicing; 4] = [
    Voicing { suffix: "", intervals: &[0, 4, 7], simple: true },
    Voicing { suffix: "6", intervals: &[0, 4, 7, 9], simple: true },
    Voicing { suffix: "7", intervals: &[0, 4, 7, 10], simple: false },
    Voicing { suffix: "9", intervals: &[0, 4, 7, 10, 14], simple: false },
];

impl ChordQuality {
    pub fn voicings(self) -> &'static [Voicing] {
        match self {
            ChordQuality::Major => &MAJOR_VOICINGS,
            ChordQuality::Minor => &MINOR_VOICINGS,
            ChordQuality::Dominant => &DOMINANT_VOICINGS,
        }
    }

    /// Diatonic quality of the chord built on `degree_interval` (semitones
    /// above the key root). Non-tertian degrees fall back to major.
    pub fn for_degree(scale: ScaleKind, degree_interval: u8) -> Self {
        let has = |offset: u8| scale.contains(degree_interval as i32 + offset as i32);
        if has(4) && has(10) {
            ChordQuality::Dominant
        } else if has(4) {
            ChordQuality::Major
        } else if has(3) {
            ChordQuality::Minor
        } else {
            ChordQuality::Major
        }
    }
}

/// Scale-degree indices (0 = tonic). Degrees past the scale length wrap up
/// an octave, which keeps five-note scales usable.
pub const PROGRESSIONS: [&[usize]; 8] = [
    &[0, 5, 3, 4],
    &[1, 4, 0, 0],
    &[0, 3],
    &[5, 3, 0, 4],
    &[0, 2, 5, 4],
    &[3, 4, 2, 5],
    &[0, 5, 1, 4, 0, 3, 1, 4],
    &[1, 4, 0, 5, 1, 4, 2, 5],
];

pub fn midi_to_freq(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}

pub fn note_name(midi: i32) -> &'static str {
    NOTE_NAMES[midi.rem_euclid(12) as usize]
}

/// Moves `note` by octaves into `lo..=hi`; `None` if the span holds no
/// note of that pitch class.
pub fn fold_into(note: i32, lo: i32, hi: i32) -> Option<i32> {
    let mut n = note;
    while n > hi {
        n -= 12;
    }
    while n < lo {
        n += 12;
    }
    (n <= hi).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_scale_qualities() {
        let major = ScaleKind::Major;
        let steps = major.intervals();
        assert_eq!(ChordQuality::for_degree(major, steps[0]), ChordQuality::Major);
        assert_eq!(ChordQuality::for_degree(major, steps[1]), ChordQuality::Minor);
        assert_eq!(ChordQuality::for_degree(major, steps[4]), ChordQuality::Dominant);
        assert_eq!(ChordQuality::for_degree(major, steps[5]), ChordQuality::Minor);
    }

    #[test]
    fn every_quality_has_simple_and_rich_voicings() {
        for quality in [ChordQuality::Major, ChordQuality::Minor, ChordQuality::Dominant] {
            let voicings = quality.voicings();
            assert_eq!(voicings.iter().filter(|v| v.simple).count(), 2);
            assert!(voicings.iter().all(|v| v.intervals[0] == 0));
        }
    }

    #[test]
    fn progressions_are_two_to_eight_long() {
        assert!(PROGRESSIONS.iter().all(|p| (2..=8).contains(&p.len())));
    }

    #[test]
    fn folding() {
        assert_eq!(fold_into(30, 36, 55), Some(42));
        assert_eq!(fold_into(80, 45, 69), Some(68));
        assert_eq!(fold_into(61, 62, 63), None);
        assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-3);
        assert_eq!(note_name(46), "Bb");
    }
}
