/// Circular buffer delay with a fixed capacity chosen at construction.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(2)],
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Sample written `delay_samples` calls ago (clamped to capacity - 1).
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(1, len - 1);
        self.buffer[(self.write_pos + len - delay) % len]
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Echo with a one-pole low-pass inside the feedback path, so every repeat
/// comes back darker than the last.
pub struct FeedbackDelay {
    line: DelayLine,
    damping_state: f32,
    damping_coeff: f32,
}

impl FeedbackDelay {
    pub fn new(sample_rate: f32, max_seconds: f32, damping_hz: f32) -> Self {
        let capacity = (sample_rate * max_seconds).ceil() as usize + 1;
        let damping_coeff = 1.0 - (-std::f32::consts::TAU * damping_hz / sample_rate).exp();
        Self {
            line: DelayLine::new(capacity),
            damping_state: 0.0,
            damping_coeff,
        }
    }

    pub fn max_delay_samples(&self) -> usize {
        self.line.capacity() - 1
    }

    /// Replaces `buffer` with the wet echo signal.
    pub fn process(&mut self, buffer: &mut [f32], delay_samples: usize, feedback: f32) {
        let feedback = feedback.clamp(0.0, 0.95);
        for sample in buffer.iter_mut() {
            let echo = self.line.read(delay_samples);
            self.damping_state += self.damping_coeff * (echo - self.damping_state);
            self.line.write(*sample + self.damping_state * feedback);
            *sample = echo;
        }
    }

    pub fn reset(&mut self) {
        self.line.reset();
        self.damping_state = 0.0;
    }
}
