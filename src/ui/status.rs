// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Status LEDs and the module status indicator.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::generation::GenerationStatus;

/// LED colour when lit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Orange,
    Green,
    Red,
}

impl LedColor {
    fn color(self) -> Color {
        match self {
            LedColor::Orange => Color::Rgb(249, 115, 22),
            LedColor::Green => Color::Rgb(34, 197, 94),
            LedColor::Red => Color::Rgb(239, 68, 68),
        }
    }
}

/// A single indicator dot
#[derive(Debug, Clone, Copy)]
pub struct StatusLed {
    active: bool,
    color: LedColor,
}

impl StatusLed {
    /// Create an LED of the given colour
    pub fn new(active: bool, color: LedColor) -> Self {
        Self { active, color }
    }

    /// Orange LED, the console default
    pub fn orange(active: bool) -> Self {
        Self::new(active, LedColor::Orange)
    }

    /// Styled glyph for inline use
    pub fn span(self) -> Span<'static> {
        if self.active {
            Span::styled(
                "●",
                Style::default()
                    .fg(self.color.color())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("●", Style::default().fg(Color::DarkGray))
        }
    }
}

/// A row of identical LEDs
pub fn led_row(count: usize, led: StatusLed) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(count * 2);
    for i in 0..count {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(led.span());
    }
    spans
}

/// Console header bar: module name on the left, LED and status on the right
pub struct StatusWidget {
    status: GenerationStatus,
}

impl StatusWidget {
    /// Create a status widget
    pub fn new(status: GenerationStatus) -> Self {
        Self { status }
    }
}

impl Widget for StatusWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(14)])
            .split(area);

        let window_dots = Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::styled("● ", Style::default().fg(Color::Yellow)),
            Span::styled("●  ", Style::default().fg(Color::Green)),
            Span::styled(
                "GENERATION MODULE v2.4",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        Paragraph::new(window_dots).render(chunks[0], buf);

        let label_style = match self.status {
            GenerationStatus::Idle => Style::default().fg(Color::Gray),
            GenerationStatus::Generating => Style::default()
                .fg(LedColor::Orange.color())
                .add_modifier(Modifier::BOLD),
            GenerationStatus::Complete => Style::default().fg(LedColor::Green.color()),
            GenerationStatus::Error => Style::default()
                .fg(LedColor::Red.color())
                .add_modifier(Modifier::BOLD),
        };
        let led = if self.status == GenerationStatus::Error {
            StatusLed::new(true, LedColor::Red)
        } else {
            StatusLed::orange(self.status.is_generating())
        };
        let indicator = Line::from(vec![
            led.span(),
            Span::raw(" "),
            Span::styled(self.status.label(), label_style),
        ]);
        Paragraph::new(indicator).render(chunks[1], buf);
    }
}
