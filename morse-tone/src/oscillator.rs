//! Phase-accumulating sine generator

use std::f32::consts::TAU;

/// Produces one sine sample per call at a fixed sample rate
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: f32,
    step: f32,
    amplitude: f32,
}

impl SineOscillator {
    pub fn new(frequency_hz: f32, sample_rate: u32, amplitude: f32) -> Self {
        Self {
            phase: 0.0,
            step: TAU * frequency_hz / sample_rate as f32,
            amplitude,
        }
    }

    /// Next sample in -amplitude..=amplitude
    pub fn next_sample(&mut self) -> f32 {
        let value = self.phase.sin() * self.amplitude;
        self.phase += self.step;
        // Keep phase bounded so precision doesn't drift on long holds
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        value
    }
}
