use crate::compose::note::DrumKind;
use crate::compose::prng::Stream;

pub const STEPS: usize = 16;

/// Per-step velocities for one bar; 0.0 means no hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DrumPattern {
    pub kick: [f32; STEPS],
    pub snare: [f32; STEPS],
    pub hihat: [f32; STEPS],
}

impl DrumPattern {
    /// Downbeat kick and backbeat snare are fixed; everything else is drawn.
    pub fn generate(rng: &mut Stream) -> Self {
        let mut kick = [0.0; STEPS];
        kick[0] = 1.0;
        if rng.chance(0.7) {
            kick[8] = 0.8;
        }
        for (step, probability) in [(6, 0.2), (10, 0.35), (14, 0.15)] {
            if rng.chance(probability) {
                kick[step] = 0.6;
            }
        }

        let mut snare = [0.0; STEPS];
        snare[4] = 0.85;
        snare[12] = 0.85;
        for step in [7, 9, 15] {
            if rng.chance(0.1) {
                snare[step] = 0.15;
            }
        }

        let mut hihat = [0.0f32; STEPS];
        for step in (0..STEPS).step_by(2) {
            if rng.chance(0.9) {
                hihat[step] = if step % 4 == 0 { 0.4 } else { 0.3 };
            }
        }
        for step in [3, 7, 11, 15] {
            if rng.chance(0.25) {
                hihat[step] = 0.18;
            }
        }
        for velocity in hihat.iter_mut().filter(|v| **v > 0.0) {
            if rng.chance(0.25) {
                *velocity = (*velocity * 1.3).min(1.0);
            }
        }

        Self { kick, snare, hihat }
    }

    /// Drum hits due at `step`, kick first.
    pub fn hits(&self, step: usize) -> impl Iterator<Item = (DrumKind, f32)> {
        let step = step % STEPS;
        [
            (DrumKind::Kick, self.kick[step]),
            (DrumKind::Snare, self.snare[step]),
            (DrumKind::HiHat, self.hihat[step]),
        ]
        .into_iter()
        .filter(|&(_, velocity)| velocity > 0.0)
    }

    /// First kick after the downbeat, if any.
    pub fn first_offbeat_kick(&self) -> Option<usize> {
        (1..STEPS).find(|&step| self.kick[step] > 0.0)
    }
}
