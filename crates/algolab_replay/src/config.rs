//! Session configuration.

use algolab_core::{Algorithm, SpeedDial};
use algolab_trace::GeneratorLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Path
        path: String,
        /// Cause
        source: std::io::Error,
    },

    /// File is not valid config JSON
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playback defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed dial a new session starts with
    pub initial_speed: SpeedDial,
    /// Algorithm a new session starts with
    pub initial_algorithm: Algorithm,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_speed: SpeedDial::DEFAULT,
            initial_algorithm: Algorithm::BubbleSort,
        }
    }
}

/// Lab configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Input caps applied before generation
    pub limits: GeneratorLimits,
    /// Playback defaults
    pub playback: PlaybackConfig,
    /// Seed for random inputs
    pub seed: u64,
}

impl LabConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set input limits
    #[must_use]
    pub fn with_limits(mut self, limits: GeneratorLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the initial speed dial
    #[must_use]
    pub fn with_initial_speed(mut self, speed: SpeedDial) -> Self {
        self.playback.initial_speed = speed;
        self
    }

    /// Set the initial algorithm
    #[must_use]
    pub fn with_initial_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.playback.initial_algorithm = algorithm;
        self
    }

    /// Set the random-input seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid config JSON
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
