use std::fmt;

/// Errors surfaced by the engine facade and the output devices.
///
/// Everything that happens once playback is running degrades instead of
/// failing, so these only come out of construction and `start()`.
#[derive(Debug)]
pub enum EngineError {
    /// The host has no default output device
    NoOutputDevice,
    /// The device refused to report a default output configuration
    OutputConfig(cpal::DefaultStreamConfigError),
    /// Device sample format we cannot render to
    UnsupportedSampleFormat(cpal::SampleFormat),
    /// Building the output stream failed
    StreamBuild(cpal::BuildStreamError),
    /// The output could not be resumed (suspended device, platform policy)
    OutputActivation(String),
    /// The scheduler thread could not be spawned
    SchedulerSpawn(std::io::Error),
    /// A previous scheduler thread died and took its state with it
    SchedulerLost,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoOutputDevice => write!(f, "no default output device available"),
            EngineError::OutputConfig(err) => {
                write!(f, "failed to fetch default output config: {err}")
            }
            EngineError::UnsupportedSampleFormat(format) => {
                write!(f, "unsupported output sample format: {format:?}")
            }
            EngineError::StreamBuild(err) => write!(f, "failed to build output stream: {err}"),
            EngineError::OutputActivation(reason) => {
                write!(f, "audio output could not be activated: {reason}")
            }
            EngineError::SchedulerSpawn(err) => {
                write!(f, "failed to spawn scheduler thread: {err}")
            }
            EngineError::SchedulerLost => write!(f, "scheduler state was lost; recreate the engine"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::OutputConfig(err) => Some(err),
            EngineError::StreamBuild(err) => Some(err),
            EngineError::SchedulerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<cpal::DefaultStreamConfigError> for EngineError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        EngineError::OutputConfig(err)
    }
}

impl From<cpal::BuildStreamError> for EngineError {
    fn from(err: cpal::BuildStreamError) -> Self {
        EngineError::StreamBuild(err)
    }
}

impl From<cpal::PlayStreamError> for EngineError {
    fn from(err: cpal::PlayStreamError) -> Self {
        EngineError::OutputActivation(err.to_string())
    }
}
