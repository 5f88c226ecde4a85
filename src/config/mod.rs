// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for FORGE.
//!
//! Every setting has a default, so an empty file (or no file at all) gives
//! the stock console: an 8 second run, 200 ms progress ticks, a 150 ms
//! waveform cadence and no failure injection.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{Genre, Mood};
use crate::error::{ForgeError, Result};
use crate::input::{COMPLEXITY_RANGE, ENERGY_RANGE, TEMPO_RANGE};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForgeConfig {
    /// Generation timer settings
    #[serde(default)]
    pub timing: TimingConfig,
    /// Initial input panel values
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Simulation knobs (failure injection, seeding)
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ForgeConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that the settings describe a console that can actually run
    pub fn validate(&self) -> Result<()> {
        self.timing.validate()?;

        let rate = self.simulation.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ForgeError::Config(format!(
                "failure_rate must be within 0.0..=1.0, got {}",
                rate
            )));
        }

        Genre::from_name(&self.defaults.genre)?;
        Mood::from_name(&self.defaults.mood)?;

        for (label, value, (min, max)) in [
            ("tempo", self.defaults.tempo, TEMPO_RANGE),
            ("energy", self.defaults.energy, ENERGY_RANGE),
            ("complexity", self.defaults.complexity, COMPLEXITY_RANGE),
        ] {
            if value < min || value > max {
                return Err(ForgeError::InvalidKnobRange {
                    label: label.to_string(),
                    message: format!("default {} outside {}..={}", value, min, max),
                });
            }
        }

        if self.ui.frame_rate == 0 {
            return Err(ForgeError::Config("ui.frame_rate must be at least 1".to_string()));
        }
        if !(1..=MAX_WAVEFORM_BARS).contains(&self.ui.waveform_bars) {
            return Err(ForgeError::Config(format!(
                "ui.waveform_bars must be within 1..={}, got {}",
                MAX_WAVEFORM_BARS, self.ui.waveform_bars
            )));
        }

        Ok(())
    }
}

/// Timers driving a simulated generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Total length of a run
    #[serde(default = "default_generation_ms")]
    pub generation_ms: u64,
    /// Period of the progress ticker
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    /// Period of the waveform toggle
    #[serde(default = "default_waveform_interval_ms")]
    pub waveform_interval_ms: u64,
    /// Upper bound (exclusive) of a single progress step, in percent
    #[serde(default = "default_max_progress_step")]
    pub max_progress_step: f64,
}

fn default_generation_ms() -> u64 {
    8000
}
fn default_progress_interval_ms() -> u64 {
    200
}
fn default_waveform_interval_ms() -> u64 {
    150
}
fn default_max_progress_step() -> f64 {
    3.0
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            generation_ms: default_generation_ms(),
            progress_interval_ms: default_progress_interval_ms(),
            waveform_interval_ms: default_waveform_interval_ms(),
            max_progress_step: default_max_progress_step(),
        }
    }
}

impl TimingConfig {
    /// Run length
    pub fn generation_duration(&self) -> Duration {
        Duration::from_millis(self.generation_ms)
    }

    /// Progress ticker period
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Waveform toggle period
    pub fn waveform_interval(&self) -> Duration {
        Duration::from_millis(self.waveform_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("generation_ms", self.generation_ms),
            ("progress_interval_ms", self.progress_interval_ms),
            ("waveform_interval_ms", self.waveform_interval_ms),
        ] {
            if value == 0 {
                return Err(ForgeError::InvalidTiming {
                    name: name.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        if !(self.max_progress_step.is_finite() && self.max_progress_step > 0.0) {
            return Err(ForgeError::InvalidTiming {
                name: "max_progress_step".to_string(),
                message: format!("must be positive and finite, got {}", self.max_progress_step),
            });
        }
        Ok(())
    }
}

/// Initial values of the input panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultsConfig {
    /// Genre name
    #[serde(default = "default_genre")]
    pub genre: String,
    /// Mood name
    #[serde(default = "default_mood")]
    pub mood: String,
    /// Tempo knob
    #[serde(default = "default_tempo")]
    pub tempo: i32,
    /// Energy knob
    #[serde(default = "default_energy")]
    pub energy: i32,
    /// Complexity knob
    #[serde(default = "default_complexity")]
    pub complexity: i32,
}

fn default_genre() -> String {
    Genre::default().name().to_string()
}
fn default_mood() -> String {
    Mood::default().name().to_string()
}
fn default_tempo() -> i32 {
    120
}
fn default_energy() -> i32 {
    70
}
fn default_complexity() -> i32 {
    50
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            genre: default_genre(),
            mood: default_mood(),
            tempo: default_tempo(),
            energy: default_energy(),
            complexity: default_complexity(),
        }
    }
}

/// Simulation behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SimulationConfig {
    /// Probability (0.0 - 1.0) that a run ends in the error state
    #[serde(default)]
    pub failure_rate: f64,
    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Most bars the waveform monitor will draw
pub const MAX_WAVEFORM_BARS: usize = 256;

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Redraw rate in frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Number of bars in the waveform monitor
    #[serde(default = "default_waveform_bars")]
    pub waveform_bars: usize,
}

fn default_frame_rate() -> u32 {
    30
}
fn default_waveform_bars() -> usize {
    32
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            waveform_bars: default_waveform_bars(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log file for interactive mode; logging is off without one
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "forge=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_filter(),
        }
    }
}
