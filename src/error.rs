// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the console library.

use thiserror::Error;

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Errors raised by the console library.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Genre name not in the genre vocabulary.
    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    /// Mood name not in the mood vocabulary.
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    /// Knob bounds or value out of range.
    #[error("invalid range for knob '{label}': {message}")]
    InvalidKnobRange {
        /// Knob label.
        label: String,
        /// What is wrong with the range.
        message: String,
    },

    /// Timing settings that would never fire or never finish.
    #[error("invalid timing '{name}': {message}")]
    InvalidTiming {
        /// Setting name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Configuration could not be parsed or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for ForgeError {
    fn from(err: serde_yaml::Error) -> Self {
        ForgeError::Config(err.to_string())
    }
}
