//! Sidetone output for the Morse transmitter
//!
//! A backend only knows how to start a sine tone and hand back a [`Voice`].
//! Dropping (or [`Voice::stop`]ping) the voice silences it and releases the
//! output stream. Nothing here knows about dots, dashes or timing.

pub mod backend;
#[cfg(feature = "cpal")]
pub mod cpal_backend;
pub mod error;
pub mod oscillator;
pub mod silent;

pub use backend::{ToneBackend, ToneSpec, Voice};
#[cfg(feature = "cpal")]
pub use cpal_backend::{list_output_devices, CpalBackend};
pub use error::ToneError;
pub use oscillator::SineOscillator;
pub use silent::{SilentBackend, ToneCounters};

/// Sidetone pitch used when nothing else is configured
pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;

/// Output amplitude used when nothing else is configured (0.0 - 1.0)
pub const DEFAULT_VOLUME: f32 = 0.2;
