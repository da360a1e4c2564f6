//! Where rendered audio goes.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use log::{error, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::io::renderer::{self, OutputPort, Renderer};

/// An audio sink the engine can wake up and let go of.
pub trait OutputDevice {
    fn sample_rate(&self) -> f32;

    /// Makes sure the device is producing audio. Called once per `start()`
    /// before the scheduler runs.
    fn resume(&mut self) -> Result<(), EngineError>;

    /// Gives the device back to the system. The device stays unusable
    /// afterwards.
    fn release(&mut self);
}

/// The default system output via cpal.
pub struct CpalOutput {
    stream: Option<Stream>,
    sample_rate: f32,
    channels: usize,
}

impl CpalOutput {
    /// Opens the default device. The stream is built paused and only starts
    /// on the first `resume()`.
    pub fn open(config: &EngineConfig) -> Result<(Self, OutputPort), EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?;
        let supported = device.default_output_config()?;

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        let format = supported.sample_format();
        let stream_config: StreamConfig = supported.into();

        let (renderer, port) = renderer::build(config, sample_rate);
        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, renderer, channels)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, renderer, channels)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, renderer, channels)?,
            other => return Err(EngineError::UnsupportedSampleFormat(other)),
        };
        if let Err(err) = stream.pause() {
            warn!("could not pause new output stream: {err}");
        }

        info!(
            "opened output {:?}: {} Hz, {} channels, {:?}",
            device.name().unwrap_or_default(),
            sample_rate,
            channels,
            format
        );
        Ok((
            Self {
                stream: Some(stream),
                sample_rate,
                channels,
            },
            port,
        ))
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut renderer: Renderer,
    channels: usize,
) -> Result<Stream, EngineError>
where
    T: SizedSample + FromSample<f32>,
{
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _| renderer.render_interleaved(data, channels),
        |err| error!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

impl OutputDevice for CpalOutput {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| EngineError::OutputActivation("output already released".into()))?;
        stream.play()?;
        Ok(())
    }

    fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                warn!("could not pause output stream: {err}");
            }
            info!("output stream released");
        }
    }
}

/// Renders on demand instead of in a device callback. Used by tests,
/// benches and anything that wants samples rather than sound.
pub struct OfflineOutput {
    renderer: Renderer,
    activation_error: Option<String>,
    released: bool,
}

impl OfflineOutput {
    pub fn new(config: &EngineConfig, sample_rate: f32) -> (Self, OutputPort) {
        let (renderer, port) = renderer::build(config, sample_rate);
        let output = Self {
            renderer,
            activation_error: None,
            released: false,
        };
        (output, port)
    }

    /// A device whose `resume()` always fails with `reason`.
    pub fn refusing(config: &EngineConfig, sample_rate: f32, reason: &str) -> (Self, OutputPort) {
        let (mut output, port) = Self::new(config, sample_rate);
        output.activation_error = Some(reason.to_string());
        (output, port)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Renders `frames` mono samples, advancing the shared clock.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.renderer.render_mono(&mut out);
        out
    }
}

impl OutputDevice for OfflineOutput {
    fn sample_rate(&self) -> f32 {
        self.renderer.clock().sample_rate()
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if self.released {
            return Err(EngineError::OutputActivation("output already released".into()));
        }
        match &self.activation_error {
            Some(reason) => Err(EngineError::OutputActivation(reason.clone())),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}
