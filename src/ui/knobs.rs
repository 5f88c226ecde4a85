// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Knob dial widgets.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::input::Knob;

/// Pointer arrows from -135 to +135 degrees in 45 degree steps
const POINTERS: [char; 7] = ['↙', '←', '↖', '↑', '↗', '→', '↘'];

/// Arrow closest to a dial rotation
pub fn pointer_glyph(degrees: f64) -> char {
    let clamped = degrees.clamp(-135.0, 135.0);
    let index = ((clamped + 135.0) / 45.0).round() as usize;
    POINTERS[index.min(POINTERS.len() - 1)]
}

/// A single dial with its label and value
pub struct KnobWidget<'a> {
    knob: &'a Knob,
    focused: bool,
}

impl<'a> KnobWidget<'a> {
    /// Create a dial for `knob`
    pub fn new(knob: &'a Knob) -> Self {
        Self {
            knob,
            focused: false,
        }
    }

    /// Highlight as the keyboard target
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for KnobWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ring = if self.focused {
            Style::default()
                .fg(Color::Rgb(249, 115, 22))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let pointer = pointer_glyph(self.knob.rotation_degrees());

        let lines = vec![
            Line::from(Span::styled("╭───╮", ring)),
            Line::from(vec![
                Span::styled("│ ", ring),
                Span::styled(
                    pointer.to_string(),
                    Style::default()
                        .fg(Color::Rgb(249, 115, 22))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" │", ring),
            ]),
            Line::from(Span::styled("╰───╯", ring)),
            Line::from(Span::styled(
                self.knob.label().to_uppercase(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                self.knob.value().to_string(),
                Style::default()
                    .fg(Color::Rgb(251, 146, 60))
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
