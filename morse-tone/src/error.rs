//! Tone backend error types

use thiserror::Error;

/// Errors that can occur while starting a tone
#[derive(Error, Debug)]
pub enum ToneError {
    #[error("No audio output device found")]
    NoOutputDevice,

    #[error("Output device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to query output config: {0}")]
    Config(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to build output stream: {0}")]
    BuildStream(String),

    #[error("Failed to start output stream: {0}")]
    PlayStream(String),

    #[error("Invalid tone: {0}")]
    InvalidTone(String),

    #[error("Audio backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "cpal")]
impl From<cpal::DefaultStreamConfigError> for ToneError {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        ToneError::Config(e.to_string())
    }
}

#[cfg(feature = "cpal")]
impl From<cpal::BuildStreamError> for ToneError {
    fn from(e: cpal::BuildStreamError) -> Self {
        ToneError::BuildStream(e.to_string())
    }
}

#[cfg(feature = "cpal")]
impl From<cpal::PlayStreamError> for ToneError {
    fn from(e: cpal::PlayStreamError) -> Self {
        ToneError::PlayStream(e.to_string())
    }
}

#[cfg(feature = "cpal")]
impl From<cpal::DevicesError> for ToneError {
    fn from(e: cpal::DevicesError) -> Self {
        ToneError::Unavailable(e.to_string())
    }
}
