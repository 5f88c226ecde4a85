// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Input panel state: prompt, genre, mood, knobs and the API key field.
//!
//! Knobs are stepped controls. A click adds a fixed step and wraps back to
//! the minimum once the value sits at the maximum, so a knob can never
//! leave its range. None of these values feed the generation logic; only
//! the prompt and genre end up in a song record.

use crate::catalog::{Genre, Mood};
use crate::config::DefaultsConfig;
use crate::error::{ForgeError, Result};
use crate::generation::GenerationStatus;

/// Tempo knob bounds (BPM)
pub const TEMPO_RANGE: (i32, i32) = (60, 180);
/// Energy knob bounds
pub const ENERGY_RANGE: (i32, i32) = (0, 100);
/// Complexity knob bounds
pub const COMPLEXITY_RANGE: (i32, i32) = (0, 100);
/// Amount added by one knob click
pub const KNOB_STEP: i32 = 10;

/// Sweep of a knob dial from minimum to maximum, in degrees
const DIAL_SWEEP: f64 = 270.0;

/// A bounded numeric control stepped by clicks
#[derive(Debug, Clone, PartialEq)]
pub struct Knob {
    label: String,
    value: i32,
    min: i32,
    max: i32,
    step: i32,
}

impl Knob {
    /// Create a knob; fails if the range is empty or the value lies outside it
    pub fn new(label: impl Into<String>, value: i32, min: i32, max: i32) -> Result<Self> {
        let label = label.into();
        if min >= max {
            return Err(ForgeError::InvalidKnobRange {
                label,
                message: format!("min {} must be below max {}", min, max),
            });
        }
        if value < min || value > max {
            return Err(ForgeError::InvalidKnobRange {
                label,
                message: format!("value {} outside {}..={}", value, min, max),
            });
        }
        Ok(Self {
            label,
            value,
            min,
            max,
            step: KNOB_STEP,
        })
    }

    /// Label shown under the dial
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current value
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Click: advance one step, wrapping to the minimum from the maximum
    pub fn click(&mut self) -> i32 {
        self.value = if self.value >= self.max {
            self.min
        } else {
            (self.value + self.step).min(self.max)
        };
        self.value
    }

    /// Value mapped onto 0.0 - 1.0
    pub fn normalized(&self) -> f64 {
        (self.value - self.min) as f64 / (self.max - self.min) as f64
    }

    /// Dial pointer angle: -135 degrees at minimum, +135 at maximum
    pub fn rotation_degrees(&self) -> f64 {
        self.normalized() * DIAL_SWEEP - DIAL_SWEEP / 2.0
    }
}

/// Identifies one of the three knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnobId {
    Tempo,
    Energy,
    Complexity,
}

impl KnobId {
    /// Knobs in panel order
    pub const ALL: [KnobId; 3] = [KnobId::Tempo, KnobId::Energy, KnobId::Complexity];

    /// Next knob, wrapping
    pub fn next(self) -> Self {
        match self {
            KnobId::Tempo => KnobId::Energy,
            KnobId::Energy => KnobId::Complexity,
            KnobId::Complexity => KnobId::Tempo,
        }
    }

    /// Previous knob, wrapping
    pub fn prev(self) -> Self {
        match self {
            KnobId::Tempo => KnobId::Complexity,
            KnobId::Energy => KnobId::Tempo,
            KnobId::Complexity => KnobId::Energy,
        }
    }
}

/// Snapshot of the panel taken when a generation is submitted
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Prompt text, verbatim
    pub prompt: String,
    /// Selected genre
    pub genre: Genre,
    /// Selected mood
    pub mood: Mood,
    /// Tempo knob value
    pub tempo: i32,
    /// Energy knob value
    pub energy: i32,
    /// Complexity knob value
    pub complexity: i32,
}

impl GenerationRequest {
    /// Whether the prompt has any non-whitespace content
    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }
}

/// Everything the user can edit before pressing generate
#[derive(Debug, Clone)]
pub struct InputPanel {
    prompt: String,
    genre: Genre,
    mood: Mood,
    tempo: Knob,
    energy: Knob,
    complexity: Knob,
    api_key: String,
    show_api_input: bool,
}

impl InputPanel {
    /// Build a panel from configured defaults
    pub fn from_config(defaults: &DefaultsConfig) -> Result<Self> {
        Ok(Self {
            prompt: String::new(),
            genre: Genre::from_name(&defaults.genre)?,
            mood: Mood::from_name(&defaults.mood)?,
            tempo: Knob::new("Tempo", defaults.tempo, TEMPO_RANGE.0, TEMPO_RANGE.1)?,
            energy: Knob::new("Energy", defaults.energy, ENERGY_RANGE.0, ENERGY_RANGE.1)?,
            complexity: Knob::new(
                "Complexity",
                defaults.complexity,
                COMPLEXITY_RANGE.0,
                COMPLEXITY_RANGE.1,
            )?,
            api_key: String::new(),
            show_api_input: false,
        })
    }

    // Prompt

    /// Current prompt text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt text
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Append a character to the prompt
    pub fn insert_char(&mut self, c: char) {
        self.prompt.push(c);
    }

    /// Remove the last character of the prompt
    pub fn backspace(&mut self) {
        self.prompt.pop();
    }

    /// Empty the prompt
    pub fn clear_prompt(&mut self) {
        self.prompt.clear();
    }

    // Genre and mood

    /// Selected genre
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Select a genre
    pub fn select_genre(&mut self, genre: Genre) {
        self.genre = genre;
    }

    /// Select a genre by display name
    pub fn select_genre_by_name(&mut self, name: &str) -> Result<()> {
        self.genre = Genre::from_name(name)?;
        Ok(())
    }

    /// Move the genre selection forward or back one entry
    pub fn cycle_genre(&mut self, forward: bool) {
        self.genre = if forward { self.genre.next() } else { self.genre.prev() };
    }

    /// Selected mood
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Select a mood
    pub fn select_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    /// Select a mood by display name
    pub fn select_mood_by_name(&mut self, name: &str) -> Result<()> {
        self.mood = Mood::from_name(name)?;
        Ok(())
    }

    /// Move the mood selection forward or back one entry
    pub fn cycle_mood(&mut self, forward: bool) {
        self.mood = if forward { self.mood.next() } else { self.mood.prev() };
    }

    // Knobs

    /// Borrow a knob
    pub fn knob(&self, id: KnobId) -> &Knob {
        match id {
            KnobId::Tempo => &self.tempo,
            KnobId::Energy => &self.energy,
            KnobId::Complexity => &self.complexity,
        }
    }

    /// Click a knob, returning its new value
    pub fn click_knob(&mut self, id: KnobId) -> i32 {
        let knob = match id {
            KnobId::Tempo => &mut self.tempo,
            KnobId::Energy => &mut self.energy,
            KnobId::Complexity => &mut self.complexity,
        };
        knob.click()
    }

    // API key (held only in memory, never used)

    /// Current API key text
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether a key has been entered
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Key rendered as bullets
    pub fn masked_api_key(&self) -> String {
        "•".repeat(self.api_key.chars().count())
    }

    /// Append a character to the API key
    pub fn push_api_key_char(&mut self, c: char) {
        self.api_key.push(c);
    }

    /// Remove the last character of the API key
    pub fn pop_api_key_char(&mut self) {
        self.api_key.pop();
    }

    /// Whether the key entry panel is shown
    pub fn show_api_input(&self) -> bool {
        self.show_api_input
    }

    /// Show or hide the key entry panel
    pub fn toggle_api_input(&mut self) {
        self.show_api_input = !self.show_api_input;
    }

    // Submission

    /// Copy of the current inputs for a new run
    pub fn snapshot(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            genre: self.genre,
            mood: self.mood,
            tempo: self.tempo.value(),
            energy: self.energy.value(),
            complexity: self.complexity.value(),
        }
    }

    /// Whether the generate button is enabled
    pub fn can_generate(&self, status: GenerationStatus) -> bool {
        status != GenerationStatus::Generating && !self.prompt.trim().is_empty()
    }
}

impl Default for InputPanel {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            genre: Genre::default(),
            mood: Mood::default(),
            tempo: Knob {
                label: "Tempo".to_string(),
                value: 120,
                min: TEMPO_RANGE.0,
                max: TEMPO_RANGE.1,
                step: KNOB_STEP,
            },
            energy: Knob {
                label: "Energy".to_string(),
                value: 70,
                min: ENERGY_RANGE.0,
                max: ENERGY_RANGE.1,
                step: KNOB_STEP,
            },
            complexity: Knob {
                label: "Complexity".to_string(),
                value: 50,
                min: COMPLEXITY_RANGE.0,
                max: COMPLEXITY_RANGE.1,
                step: KNOB_STEP,
            },
            api_key: String::new(),
            show_api_input: false,
        }
    }
}
