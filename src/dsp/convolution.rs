//! Uniformly partitioned overlap-save convolution.
//!
//! The impulse response is cut into `PARTITION`-sample blocks, each kept as a
//! spectrum of size `2 * PARTITION`. Incoming audio is collected into blocks
//! of the same size; every full block is transformed once, pushed onto a
//! frequency-domain delay line and multiplied against all partitions. The
//! price is a fixed latency of one partition.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

pub const PARTITION: usize = 512;
const FFT_SIZE: usize = PARTITION * 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ImpulseError {
    Empty,
    NonFinite { index: usize },
    Silent,
}

impl fmt::Display for ImpulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpulseError::Empty => write!(f, "impulse response is empty"),
            ImpulseError::NonFinite { index } => {
                write!(f, "impulse response has a non-finite sample at {index}")
            }
            ImpulseError::Silent => write!(f, "impulse response is silent"),
        }
    }
}

impl std::error::Error for ImpulseError {}

/// Decaying noise burst used as a room: `noise * (1 - t)^decay` over
/// `seconds`, normalised to unit energy.
pub fn impulse_response(sample_rate: f32, seconds: f32, decay: f32, seed: u32) -> Vec<f32> {
    let len = (sample_rate * seconds.max(0.0)).round() as usize;
    let mut state = seed | 1;
    let mut impulse: Vec<f32> = (0..len)
        .map(|n| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            noise * (1.0 - n as f32 / len as f32).powf(decay)
        })
        .collect();

    let energy: f32 = impulse.iter().map(|s| s * s).sum::<f32>().sqrt();
    if energy > 0.0 {
        impulse.iter_mut().for_each(|s| *s /= energy);
    }
    impulse
}

pub struct ConvolutionReverb {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    partitions: Vec<Vec<Complex<f32>>>,
    // Input spectra, newest at `head`.
    history: Vec<Vec<Complex<f32>>>,
    head: usize,

    window: Vec<f32>,
    input: Vec<f32>,
    output: Vec<f32>,
    pos: usize,

    spectrum: Vec<Complex<f32>>,
    accum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl ConvolutionReverb {
    pub fn new(impulse: &[f32]) -> Result<Self, ImpulseError> {
        if impulse.is_empty() {
            return Err(ImpulseError::Empty);
        }
        if let Some(index) = impulse.iter().position(|s| !s.is_finite()) {
            return Err(ImpulseError::NonFinite { index });
        }
        if impulse.iter().all(|&s| s == 0.0) {
            return Err(ImpulseError::Silent);
        }

        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(FFT_SIZE);
        let inverse = planner.plan_fft_inverse(FFT_SIZE);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        let mut scratch = vec![Complex::default(); scratch_len];

        let partitions: Vec<Vec<Complex<f32>>> = impulse
            .chunks(PARTITION)
            .map(|chunk| {
                let mut spectrum = vec![Complex::default(); FFT_SIZE];
                for (bin, &s) in spectrum.iter_mut().zip(chunk) {
                    bin.re = s;
                }
                forward.process_with_scratch(&mut spectrum, &mut scratch);
                spectrum
            })
            .collect();
        let history = vec![vec![Complex::default(); FFT_SIZE]; partitions.len()];

        Ok(Self {
            forward,
            inverse,
            partitions,
            history,
            head: 0,
            window: vec![0.0; FFT_SIZE],
            input: vec![0.0; PARTITION],
            output: vec![0.0; PARTITION],
            pos: 0,
            spectrum: vec![Complex::default(); FFT_SIZE],
            accum: vec![Complex::default(); FFT_SIZE],
            scratch,
        })
    }

    pub fn latency(&self) -> usize {
        PARTITION
    }

    /// Replaces `buffer` with the wet signal, delayed by `latency()` samples.
    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let wet = self.output[self.pos];
            self.input[self.pos] = *sample;
            *sample = wet;
            self.pos += 1;
            if self.pos == PARTITION {
                self.pos = 0;
                self.convolve_block();
            }
        }
    }

    fn convolve_block(&mut self) {
        self.window.copy_within(PARTITION.., 0);
        self.window[PARTITION..].copy_from_slice(&self.input);

        for (bin, &s) in self.spectrum.iter_mut().zip(&self.window) {
            *bin = Complex::new(s, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        let count = self.partitions.len();
        self.head = (self.head + count - 1) % count;
        self.history[self.head].copy_from_slice(&self.spectrum);

        self.accum.fill(Complex::default());
        for (k, partition) in self.partitions.iter().enumerate() {
            let delayed = &self.history[(self.head + k) % count];
            for ((acc, x), h) in self.accum.iter_mut().zip(delayed).zip(partition) {
                *acc += x * h;
            }
        }

        self.inverse
            .process_with_scratch(&mut self.accum, &mut self.scratch);
        let norm = 1.0 / FFT_SIZE as f32;
        for (out, bin) in self.output.iter_mut().zip(&self.accum[PARTITION..]) {
            *out = bin.re * norm;
        }
    }
}
