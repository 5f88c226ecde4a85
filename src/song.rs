// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fabricated song records and the newest-first results list.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Genre;
use crate::input::GenerationRequest;

/// Title adjectives
pub const TITLE_ADJECTIVES: [&str; 8] = [
    "Neon", "Electric", "Midnight", "Golden", "Crystal", "Shadow", "Cosmic", "Digital",
];

/// Title nouns
pub const TITLE_NOUNS: [&str; 8] = [
    "Dreams", "Horizons", "Waves", "Echoes", "Pulse", "Storm", "Journey", "Light",
];

/// Song length shown as `m:ss`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongDuration {
    minutes: u8,
    seconds: u8,
}

impl SongDuration {
    /// Create a duration; seconds above 59 are folded into minutes
    pub fn new(minutes: u8, seconds: u8) -> Self {
        Self {
            minutes: minutes.saturating_add(seconds / 60),
            seconds: seconds % 60,
        }
    }

    /// Whole minutes
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Remaining seconds (0-59)
    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Total length in seconds
    pub fn total_seconds(&self) -> u32 {
        self.minutes as u32 * 60 + self.seconds as u32
    }
}

impl fmt::Display for SongDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// A fabricated generation result. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSong {
    id: String,
    title: String,
    prompt: String,
    genre: Genre,
    duration: SongDuration,
    created_at: DateTime<Utc>,
}

impl GeneratedSong {
    /// Time-derived identifier (Unix milliseconds)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adjective + noun title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prompt as submitted
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Genre as submitted
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Fabricated length
    pub fn duration(&self) -> SongDuration {
        self.duration
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Makes up titles, durations and records
#[derive(Debug)]
pub struct SongFactory {
    rng: StdRng,
}

impl SongFactory {
    /// Create a factory, seeded for reproducible output when a seed is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Random "<Adjective> <Noun>" title
    pub fn random_title(&mut self) -> String {
        let adjective = TITLE_ADJECTIVES[self.rng.gen_range(0..TITLE_ADJECTIVES.len())];
        let noun = TITLE_NOUNS[self.rng.gen_range(0..TITLE_NOUNS.len())];
        format!("{} {}", adjective, noun)
    }

    /// Random duration between 2:00 and 3:59
    pub fn random_duration(&mut self) -> SongDuration {
        SongDuration::new(self.rng.gen_range(2..=3), self.rng.gen_range(0..60))
    }

    /// Build a record from the request captured at submission
    pub fn fabricate(&mut self, request: &GenerationRequest, now: DateTime<Utc>) -> GeneratedSong {
        GeneratedSong {
            id: now.timestamp_millis().to_string(),
            title: self.random_title(),
            prompt: request.prompt.clone(),
            genre: request.genre,
            duration: self.random_duration(),
            created_at: now,
        }
    }
}

/// Append-only list of results, newest first
#[derive(Debug, Clone, Default)]
pub struct ResultsList {
    songs: VecDeque<GeneratedSong>,
}

impl ResultsList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record ahead of all earlier ones
    pub fn prepend(&mut self, song: GeneratedSong) {
        self.songs.push_front(song);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether nothing has been generated yet
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&GeneratedSong> {
        self.songs.front()
    }

    /// Records, newest first
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedSong> {
        self.songs.iter()
    }
}
