//! Configuration for the transmitter
//!
//! Stored as TOML. A missing file means defaults; a present file may set any
//! subset of fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use morse_tone::{ToneSpec, DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transmitter::KeyerSettings;

/// Errors from loading, saving or validating the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Sidetone settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneConfig {
    #[serde(default = "default_frequency")]
    pub frequency_hz: f32,
    /// Peak amplitude (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Output device name; the host default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

fn default_frequency() -> f32 {
    DEFAULT_FREQUENCY_HZ
}
fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency(),
            volume: default_volume(),
            device: None,
        }
    }
}

/// Hold timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Resolution of the hold timer
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Holds at or above this length are dashes
    #[serde(default = "default_dash_threshold")]
    pub dash_threshold_ms: u64,
}

fn default_tick_interval() -> u64 {
    100
}
fn default_dash_threshold() -> u64 {
    100
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            dash_threshold_ms: default_dash_threshold(),
        }
    }
}

/// Complete transmitter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyerConfig {
    #[serde(default)]
    pub tone: ToneConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl KeyerConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("morse-transmitter")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: KeyerConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.timing.dash_threshold_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.dash_threshold_ms must be greater than 0".to_string(),
            ));
        }
        self.tone_spec()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn tone_spec(&self) -> ToneSpec {
        ToneSpec::new(self.tone.frequency_hz, self.tone.volume)
    }

    /// Runtime keyer parameters
    pub fn settings(&self) -> KeyerSettings {
        KeyerSettings {
            tick_interval: Duration::from_millis(self.timing.tick_interval_ms),
            dash_threshold: Duration::from_millis(self.timing.dash_threshold_ms),
            tone: self.tone_spec(),
        }
    }
}
