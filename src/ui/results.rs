// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generated tracks list.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::status::{LedColor, StatusLed};
use crate::song::{GeneratedSong, ResultsList};

/// Widget listing generated songs, newest at the top
pub struct ResultsWidget<'a> {
    results: &'a ResultsList,
    block: Option<Block<'a>>,
}

impl<'a> ResultsWidget<'a> {
    /// Create a results widget
    pub fn new(results: &'a ResultsList) -> Self {
        Self {
            results,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if area.height == 0 {
            return;
        }

        if self.results.is_empty() {
            Paragraph::new("No tracks generated yet")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let header = Line::from(vec![
            StatusLed::new(true, LedColor::Green).span(),
            Span::styled(
                " GENERATED TRACKS",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let header_area = Rect { height: 1, ..area };
        Paragraph::new(header).render(header_area, buf);

        let rows = (area.height - 1) as usize;
        for (i, song) in self.results.iter().take(rows).enumerate() {
            let row = Rect {
                y: area.y + 1 + i as u16,
                height: 1,
                ..area
            };
            render_song_row(row, buf, song);
        }
    }
}

/// Render a single song row
fn render_song_row(area: Rect, buf: &mut Buffer, song: &GeneratedSong) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),  // Play glyph
            Constraint::Length(18), // Title
            Constraint::Min(10),    // Prompt
            Constraint::Length(18), // Genre
            Constraint::Length(5),  // Duration
        ])
        .split(area);

    Paragraph::new("▶")
        .style(Style::default().fg(Color::Rgb(249, 115, 22)))
        .render(chunks[0], buf);
    Paragraph::new(song.title())
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .render(chunks[1], buf);
    // Multi-line prompts show their first line only
    let prompt = song.prompt().lines().next().unwrap_or("");
    Paragraph::new(prompt)
        .style(Style::default().fg(Color::DarkGray))
        .render(chunks[2], buf);
    Paragraph::new(format!("[{}]", song.genre()))
        .style(Style::default().fg(Color::Gray))
        .render(chunks[3], buf);
    Paragraph::new(song.duration().to_string())
        .style(Style::default().fg(Color::Gray))
        .render(chunks[4], buf);
}
