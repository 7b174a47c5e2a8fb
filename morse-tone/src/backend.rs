//! Backend trait, tone parameters and the live voice handle

use std::any::Any;

use crate::error::ToneError;
use crate::{DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME};

/// Lowest audible pitch accepted
pub const MIN_FREQUENCY_HZ: f32 = 20.0;
/// Highest audible pitch accepted
pub const MAX_FREQUENCY_HZ: f32 = 20_000.0;

/// What to play: a sine at `frequency_hz` scaled to `volume`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    /// Peak amplitude (0.0 - 1.0)
    pub volume: f32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl ToneSpec {
    pub fn new(frequency_hz: f32, volume: f32) -> Self {
        Self {
            frequency_hz,
            volume,
        }
    }

    /// Check that the tone is playable
    pub fn validate(&self) -> Result<(), ToneError> {
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz) {
            return Err(ToneError::InvalidTone(format!(
                "frequency {} Hz outside {}-{} Hz",
                self.frequency_hz, MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ToneError::InvalidTone(format!(
                "volume {} outside 0.0-1.0",
                self.volume
            )));
        }
        Ok(())
    }
}

/// A tone that is currently sounding.
///
/// Owns whatever the backend needs to keep the signal alive (for cpal, the
/// output stream). The signal stops when the voice is dropped.
pub struct Voice {
    backend: &'static str,
    // Held as Box<dyn Any> because cpal::Stream is not Send and has no common
    // trait with the other backends; it must be dropped on the thread that made it
    _inner: Box<dyn Any>,
}

impl Voice {
    /// Wrap a backend resource whose drop silences the tone
    pub fn new(backend: &'static str, inner: impl Any) -> Self {
        Self {
            backend,
            _inner: Box::new(inner),
        }
    }

    /// Stop the tone and release its resources
    pub fn stop(self) {
        tracing::trace!("Stopping {} voice", self.backend);
        drop(self);
    }
}

impl std::fmt::Debug for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

/// Something that can play a sidetone
pub trait ToneBackend {
    /// Short name for status display and logs
    fn name(&self) -> &str;

    /// Start a tone. The returned voice keeps sounding until dropped.
    fn start(&mut self, tone: &ToneSpec) -> Result<Voice, ToneError>;
}
