//! Backend that plays nothing
//!
//! Used for `--mute`, when no audio device can be opened, and by tests that
//! need to check that every started voice was stopped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::backend::{ToneBackend, ToneSpec, Voice};
use crate::error::ToneError;

/// Shared start/stop counters for voices from a [`SilentBackend`]
#[derive(Debug, Clone, Default)]
pub struct ToneCounters {
    started: Arc<AtomicUsize>,
    stopped: Arc<AtomicUsize>,
}

impl ToneCounters {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Voices started but not yet stopped
    pub fn live(&self) -> usize {
        self.started() - self.stopped()
    }
}

/// Resource behind a silent voice; counts the stop on drop
struct SilentVoice {
    counters: ToneCounters,
}

impl Drop for SilentVoice {
    fn drop(&mut self) {
        self.counters.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tone backend with no audio output
#[derive(Debug, Default)]
pub struct SilentBackend {
    counters: ToneCounters,
    /// When set, every start fails with this reason
    fail_with: Option<String>,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every start fails, for exercising the no-audio path
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            counters: ToneCounters::default(),
            fail_with: Some(reason.into()),
        }
    }

    /// Handle for observing starts and stops after the backend is moved away
    pub fn counters(&self) -> ToneCounters {
        self.counters.clone()
    }
}

impl ToneBackend for SilentBackend {
    fn name(&self) -> &str {
        "silent"
    }

    fn start(&mut self, tone: &ToneSpec) -> Result<Voice, ToneError> {
        if let Some(reason) = &self.fail_with {
            return Err(ToneError::Unavailable(reason.clone()));
        }
        tone.validate()?;
        self.counters.started.fetch_add(1, Ordering::SeqCst);
        Ok(Voice::new(
            "silent",
            SilentVoice {
                counters: self.counters.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_counts_stop() {
        let mut backend = SilentBackend::new();
        let counters = backend.counters();

        let voice = backend.start(&ToneSpec::default()).unwrap();
        assert_eq!(counters.started(), 1);
        assert_eq!(counters.live(), 1);

        drop(voice);
        assert_eq!(counters.stopped(), 1);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn test_explicit_stop_counts_once() {
        let mut backend = SilentBackend::new();
        let counters = backend.counters();

        backend.start(&ToneSpec::default()).unwrap().stop();
        assert_eq!(counters.started(), 1);
        assert_eq!(counters.stopped(), 1);
    }

    #[test]
    fn test_failing_backend_starts_nothing() {
        let mut backend = SilentBackend::failing("no device");
        let counters = backend.counters();

        let err = backend.start(&ToneSpec::default()).unwrap_err();
        assert!(matches!(err, ToneError::Unavailable(_)));
        assert_eq!(counters.started(), 0);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let mut backend = SilentBackend::new();
        assert!(backend.start(&ToneSpec::new(1.0, 0.2)).is_err());
        assert_eq!(backend.counters().started(), 0);
    }
}
