//! Instrument table: one profile per instrument class, each naming its
//! default envelope, how it reads note durations, its mix level and the
//! voice graph it is built from.

use crate::compose::note::{DrumKind, Instrument};
use crate::dsp::{Adsr, Waveform};
use crate::graph::GraphNode;
use crate::voices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationMode {
    /// Gate stays open for the whole duration, then the release runs.
    UntilRelease,
    /// Duration is the total audible length, release included.
    Total,
}

type PitchedBuilder = fn(Adsr, Waveform) -> Box<dyn GraphNode>;
type DrumBuilder = fn() -> Box<dyn GraphNode>;

pub struct InstrumentProfile {
    pub shape: Adsr,
    pub duration: DurationMode,
    pub gain: f32,
    pub waveform: Waveform,
    builder: PitchedBuilder,
}

impl InstrumentProfile {
    pub fn build(&self, shape: Adsr, waveform: Waveform) -> Box<dyn GraphNode> {
        (self.builder)(shape, waveform)
    }
}

pub struct DrumProfile {
    pub gain: f32,
    /// Seconds before the gate closes. Drum envelopes have no sustain, so
    /// this only bounds how long the voice stays in the rack.
    pub hold: f32,
    pub release: f32,
    builder: DrumBuilder,
}

impl DrumProfile {
    pub fn build(&self) -> Box<dyn GraphNode> {
        (self.builder)()
    }
}

fn build_pad(shape: Adsr, _: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::pad(shape))
}

fn build_bass(shape: Adsr, _: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::bass(shape))
}

fn build_epiano(shape: Adsr, _: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::epiano(shape))
}

fn build_lead(shape: Adsr, waveform: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::lead(shape, waveform))
}

fn build_flute(shape: Adsr, _: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::flute(shape))
}

fn build_arp(shape: Adsr, waveform: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::arp(shape, waveform))
}

fn build_atmosphere(shape: Adsr, _: Waveform) -> Box<dyn GraphNode> {
    Box::new(voices::atmosphere(shape))
}

fn build_kick() -> Box<dyn GraphNode> {
    Box::new(voices::kick())
}

fn build_snare() -> Box<dyn GraphNode> {
    Box::new(voices::snare())
}

fn build_hihat() -> Box<dyn GraphNode> {
    Box::new(voices::hihat())
}

static PAD: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(1.2, 0.8, 0.7, 2.5),
    duration: DurationMode::UntilRelease,
    gain: 0.13,
    waveform: Waveform::Saw,
    builder: build_pad,
};

static BASS: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(0.02, 0.3, 0.75, 0.4),
    duration: DurationMode::UntilRelease,
    gain: 0.5,
    waveform: Waveform::Sine,
    builder: build_bass,
};

static ELECTRIC_PIANO: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(0.005, 0.6, 0.35, 0.5),
    duration: DurationMode::Total,
    gain: 0.22,
    waveform: Waveform::Sine,
    builder: build_epiano,
};

static LEAD: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(0.03, 0.2, 0.6, 0.3),
    duration: DurationMode::Total,
    gain: 0.16,
    waveform: Waveform::Triangle,
    builder: build_lead,
};

static FLUTE: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(0.12, 0.2, 0.8, 0.35),
    duration: DurationMode::UntilRelease,
    gain: 0.2,
    waveform: Waveform::Sine,
    builder: build_flute,
};

static ARP: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(0.003, 0.25, 0.0, 0.15),
    duration: DurationMode::Total,
    gain: 0.14,
    waveform: Waveform::Triangle,
    builder: build_arp,
};

static ATMOSPHERE: InstrumentProfile = InstrumentProfile {
    shape: Adsr::new(3.0, 2.0, 0.8, 4.0),
    duration: DurationMode::UntilRelease,
    gain: 0.6,
    waveform: Waveform::Sine,
    builder: build_atmosphere,
};

static KICK: DrumProfile = DrumProfile {
    gain: 0.9,
    hold: 0.45,
    release: 0.05,
    builder: build_kick,
};

static SNARE: DrumProfile = DrumProfile {
    gain: 0.45,
    hold: 0.2,
    release: 0.06,
    builder: build_snare,
};

static HIHAT: DrumProfile = DrumProfile {
    gain: 0.2,
    hold: 0.06,
    release: 0.03,
    builder: build_hihat,
};

pub fn profile(instrument: Instrument) -> &'static InstrumentProfile {
    match instrument {
        Instrument::Pad => &PAD,
        Instrument::Bass => &BASS,
        Instrument::ElectricPiano => &ELECTRIC_PIANO,
        Instrument::Lead => &LEAD,
        Instrument::Flute => &FLUTE,
        Instrument::Arp => &ARP,
        Instrument::Atmosphere => &ATMOSPHERE,
    }
}

pub fn drum_profile(kind: DrumKind) -> &'static DrumProfile {
    match kind {
        DrumKind::Kick => &KICK,
        DrumKind::Snare => &SNARE,
        DrumKind::HiHat => &HIHAT,
    }
}
