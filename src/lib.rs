// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! FORGE - a simulated music-generation console.
//!
//! Collects a prompt, genre, mood and a few knob settings, runs a timed
//! fake "generation" with animated feedback and fabricates a song record
//! at the end. Nothing is synthesized and nothing leaves the process.

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod generation;
pub mod input;
pub mod song;
pub mod ui;

pub use config::ForgeConfig;
pub use console::Console;
pub use error::{ForgeError, Result};
pub use generation::{GenerationController, GenerationStatus, RunEvent, RunId, SubmitOutcome};
pub use input::{GenerationRequest, InputPanel, Knob};
pub use song::{GeneratedSong, ResultsList, SongDuration, SongFactory};
