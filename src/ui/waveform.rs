// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Waveform monitor.
//!
//! The bars carry no audio meaning. While the activity flag is on they get
//! fresh random heights; while it is off they sit flat at 20%. Heights are
//! only re-rolled when the flag changes, so the animation follows the
//! controller's toggle cadence rather than the frame rate.

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Height of every bar while idle (fraction of full height)
pub const IDLE_BAR_HEIGHT: f64 = 0.2;

const BAR_GLYPHS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Bar heights for one frame
pub fn bar_heights<R: Rng>(bars: usize, active: bool, rng: &mut R) -> Vec<f64> {
    if active {
        (0..bars).map(|_| rng.gen_range(0.0..1.0)).collect()
    } else {
        vec![IDLE_BAR_HEIGHT; bars]
    }
}

/// Bar heights kept between frames
#[derive(Debug, Clone)]
pub struct WaveformState {
    bars: usize,
    active: bool,
    heights: Vec<f64>,
}

impl WaveformState {
    /// Idle waveform with `bars` bars
    pub fn new(bars: usize) -> Self {
        Self {
            bars,
            active: false,
            heights: vec![IDLE_BAR_HEIGHT; bars],
        }
    }

    /// Follow the controller's activity flag; re-rolls on change
    pub fn update<R: Rng>(&mut self, active: bool, rng: &mut R) {
        if active != self.active {
            self.active = active;
            self.heights = bar_heights(self.bars, active, rng);
        }
    }

    /// Whether the bars are currently animated
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current heights (0.0 - 1.0)
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }
}

/// Vertical bar display
pub struct WaveformWidget<'a> {
    heights: &'a [f64],
    active: bool,
}

impl<'a> WaveformWidget<'a> {
    /// Create a widget over precomputed heights
    pub fn new(state: &'a WaveformState) -> Self {
        Self {
            heights: state.heights(),
            active: state.is_active(),
        }
    }
}

impl Widget for WaveformWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.heights.is_empty() {
            return;
        }

        // Two columns per bar (bar + gap), centred
        let width = area.width as usize;
        let shown = self.heights.len().min((width + 1) / 2);
        let used = (shown * 2).saturating_sub(1);
        let left = area.x + ((width - used) / 2) as u16;

        let style = if self.active {
            Style::default().fg(Color::Rgb(251, 191, 36))
        } else {
            Style::default().fg(Color::Rgb(120, 53, 15))
        };

        // Height in eighths of a cell
        let rows = area.height as usize;
        for (i, height) in self.heights.iter().take(shown).enumerate() {
            let x = left + i as u16 * 2;
            let eighths = (height.clamp(0.0, 1.0) * (rows * 8) as f64).round() as usize;
            let eighths = eighths.max(1);
            for row in 0..rows {
                let from_bottom = row * 8;
                if eighths <= from_bottom {
                    break;
                }
                let fill = (eighths - from_bottom).min(8);
                let y = area.y + area.height - 1 - row as u16;
                buf[(x, y)].set_symbol(BAR_GLYPHS[fill - 1]).set_style(style);
            }
        }
    }
}
