use crate::compose::theory::midi_to_freq;
use crate::dsp::{Adsr, Waveform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Pad,
    Bass,
    ElectricPiano,
    Lead,
    Flute,
    Arp,
    Atmosphere,
}

impl Instrument {
    pub const ALL: [Instrument; 7] = [
        Instrument::Pad,
        Instrument::Bass,
        Instrument::ElectricPiano,
        Instrument::Lead,
        Instrument::Flute,
        Instrument::Arp,
        Instrument::Atmosphere,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Pad => "pad",
            Instrument::Bass => "bass",
            Instrument::ElectricPiano => "electric piano",
            Instrument::Lead => "lead",
            Instrument::Flute => "flute",
            Instrument::Arp => "arp",
            Instrument::Atmosphere => "atmosphere",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumKind {
    Kick,
    Snare,
    HiHat,
}

/// One pitched note of a bar, consumed by the scheduler at `step`.
///
/// `duration_beats` is read per instrument: sustained instruments hold for
/// that long and then release, short ones fit their release inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub instrument: Instrument,
    pub step: u8,
    pub frequency: f32,
    pub duration_beats: f32,
    pub velocity: f32,
    pub waveform: Option<Waveform>,
    pub envelope: Option<Adsr>,
}

impl NoteEvent {
    pub fn new(instrument: Instrument, step: u8, frequency: f32, duration_beats: f32, velocity: f32) -> Self {
        Self {
            instrument,
            step,
            frequency,
            duration_beats,
            velocity,
            waveform: None,
            envelope: None,
        }
    }

    pub fn midi(instrument: Instrument, step: u8, note: i32, duration_beats: f32, velocity: f32) -> Self {
        Self::new(instrument, step, midi_to_freq(note as f32), duration_beats, velocity)
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = Some(waveform);
        self
    }

    pub fn with_envelope(mut self, envelope: Adsr) -> Self {
        self.envelope = Some(envelope);
        self
    }
}
