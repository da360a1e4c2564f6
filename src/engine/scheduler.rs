//! Lookahead step clock.
//!
//! The scheduler never waits for anything: each `tick` looks at the audio
//! clock, and every sixteenth step whose time falls inside
//! `now + lookahead` is dispatched with its exact future timestamp. Tick
//! jitter only has to stay below the lookahead.

use log::debug;

use crate::compose::composer::{BarPlan, Composer};
use crate::compose::drums::STEPS;
use crate::synth::synthesizer::Synthesizer;
use crate::synth::voice::VoiceSink;

pub struct Scheduler {
    lookahead: f64,
    next_event_time: f64,
    step: u8,
    bar_count: u64,
    bar: Option<BarPlan>,
}

impl Scheduler {
    pub fn new(lookahead_seconds: f64) -> Self {
        Self {
            lookahead: lookahead_seconds.max(0.0),
            next_event_time: 0.0,
            step: 0,
            bar_count: 0,
            bar: None,
        }
    }

    /// Back to step 0 of bar 0, with the first step due at `start_time`.
    pub fn reset(&mut self, start_time: f64) {
        self.next_event_time = start_time;
        self.step = 0;
        self.bar_count = 0;
        self.bar = None;
    }

    /// Drops the current bar so the next step starts a fresh one, keeping
    /// the step clock where it is.
    pub fn restart_bar(&mut self) {
        self.step = 0;
        self.bar = None;
    }

    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Completed bars since the last reset.
    pub fn bar_count(&self) -> u64 {
        self.bar_count
    }

    pub fn current_bar(&self) -> Option<&BarPlan> {
        self.bar.as_ref()
    }

    /// Dispatches every step due before `now + lookahead`. Returns how many
    /// steps were dispatched.
    pub fn tick(
        &mut self,
        now: f64,
        composer: &mut Composer,
        synth: &Synthesizer,
        sink: &mut impl VoiceSink,
    ) -> usize {
        let horizon = now + self.lookahead;
        let beat_seconds = composer.composition().beat_seconds();
        let step_seconds = composer.composition().step_seconds();
        let mut dispatched = 0;

        while self.next_event_time < horizon {
            if self.step == 0 || self.bar.is_none() {
                let bar = composer.generate_next_bar();
                debug!("bar {} on {} (degree {})", bar.index, bar.chord.name(), bar.degree);
                self.bar = Some(bar);
            }
            self.dispatch_step(beat_seconds, synth, sink);

            self.next_event_time += step_seconds;
            self.step += 1;
            if self.step as usize == STEPS {
                self.step = 0;
                self.bar_count += 1;
            }
            dispatched += 1;
        }
        dispatched
    }

    fn dispatch_step(&self, beat_seconds: f64, synth: &Synthesizer, sink: &mut impl VoiceSink) {
        let Some(bar) = self.bar.as_ref() else {
            return;
        };
        let time = self.next_event_time;

        for (kind, velocity) in bar.drums.hits(self.step as usize) {
            synth.schedule_drum(kind, time, velocity, sink);
        }
        for note in bar.notes_at(self.step) {
            synth.schedule_note(note, time, beat_seconds, sink);
        }
    }
}
