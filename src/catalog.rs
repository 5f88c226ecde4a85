// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Genre and mood vocabularies offered by the input panel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// Musical genre choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Synthwave,
    LoFiHipHop,
    EpicOrchestral,
    IndieFolk,
    HardRock,
    JazzFusion,
    Ambient,
    Pop,
    Electronic,
    ClassicalPiano,
    RnbSoul,
    HeavyMetal,
}

impl Genre {
    /// All genres in display order
    pub const ALL: [Genre; 12] = [
        Genre::Synthwave,
        Genre::LoFiHipHop,
        Genre::EpicOrchestral,
        Genre::IndieFolk,
        Genre::HardRock,
        Genre::JazzFusion,
        Genre::Ambient,
        Genre::Pop,
        Genre::Electronic,
        Genre::ClassicalPiano,
        Genre::RnbSoul,
        Genre::HeavyMetal,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Genre::Synthwave => "Synthwave",
            Genre::LoFiHipHop => "Lo-Fi Hip Hop",
            Genre::EpicOrchestral => "Epic Orchestral",
            Genre::IndieFolk => "Indie Folk",
            Genre::HardRock => "Hard Rock",
            Genre::JazzFusion => "Jazz Fusion",
            Genre::Ambient => "Ambient",
            Genre::Pop => "Pop",
            Genre::Electronic => "Electronic",
            Genre::ClassicalPiano => "Classical Piano",
            Genre::RnbSoul => "R&B Soul",
            Genre::HeavyMetal => "Heavy Metal",
        }
    }

    /// Position in [`Genre::ALL`]
    pub fn index(self) -> usize {
        Genre::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }

    /// Parse from a display name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ForgeError::UnknownGenre(name.to_string()))
    }

    /// Next genre, wrapping
    pub fn next(self) -> Self {
        Genre::ALL[(self.index() + 1) % Genre::ALL.len()]
    }

    /// Previous genre, wrapping
    pub fn prev(self) -> Self {
        let len = Genre::ALL.len();
        Genre::ALL[(self.index() + len - 1) % len]
    }
}

impl Default for Genre {
    fn default() -> Self {
        Genre::Synthwave
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mood choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Energetic,
    Melancholic,
    Uplifting,
    Dark,
    Peaceful,
    Aggressive,
    Romantic,
    Mysterious,
    Triumphant,
    Dreamy,
}

impl Mood {
    /// All moods in display order
    pub const ALL: [Mood; 10] = [
        Mood::Energetic,
        Mood::Melancholic,
        Mood::Uplifting,
        Mood::Dark,
        Mood::Peaceful,
        Mood::Aggressive,
        Mood::Romantic,
        Mood::Mysterious,
        Mood::Triumphant,
        Mood::Dreamy,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Mood::Energetic => "Energetic",
            Mood::Melancholic => "Melancholic",
            Mood::Uplifting => "Uplifting",
            Mood::Dark => "Dark",
            Mood::Peaceful => "Peaceful",
            Mood::Aggressive => "Aggressive",
            Mood::Romantic => "Romantic",
            Mood::Mysterious => "Mysterious",
            Mood::Triumphant => "Triumphant",
            Mood::Dreamy => "Dreamy",
        }
    }

    /// Position in [`Mood::ALL`]
    pub fn index(self) -> usize {
        Mood::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Parse from a display name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ForgeError::UnknownMood(name.to_string()))
    }

    /// Next mood, wrapping
    pub fn next(self) -> Self {
        Mood::ALL[(self.index() + 1) % Mood::ALL.len()]
    }

    /// Previous mood, wrapping
    pub fn prev(self) -> Self {
        let len = Mood::ALL.len();
        Mood::ALL[(self.index() + len - 1) % len]
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Energetic
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
