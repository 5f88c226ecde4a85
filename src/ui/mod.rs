// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the FORGE console.
//!
//! Provides a ratatui-based console with the prompt editor, genre and mood
//! pickers, knob dials, waveform monitor, generate button and the list of
//! generated tracks. Everything on screen is derived from [`Console`] state
//! plus a small amount of view state (focus, help, hit regions).

mod knobs;
mod results;
mod status;
mod waveform;

pub use knobs::{pointer_glyph, KnobWidget};
pub use results::ResultsWidget;
pub use status::{led_row, LedColor, StatusLed, StatusWidget};
pub use waveform::{bar_heights, WaveformState, WaveformWidget, IDLE_BAR_HEIGHT};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::catalog::{Genre, Mood};
use crate::console::Console;
use crate::generation::{GenerationStatus, SubmitOutcome};
use crate::input::KnobId;

const ACCENT: Color = Color::Rgb(249, 115, 22);
const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Which panel receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Genre,
    Mood,
    Knobs,
    ApiKey,
}

impl Focus {
    /// Next focus target; the API key field only while its panel is shown
    pub fn next(self, api_visible: bool) -> Self {
        match self {
            Focus::Prompt => Focus::Genre,
            Focus::Genre => Focus::Mood,
            Focus::Mood => Focus::Knobs,
            Focus::Knobs if api_visible => Focus::ApiKey,
            Focus::Knobs | Focus::ApiKey => Focus::Prompt,
        }
    }

    /// Previous focus target
    pub fn prev(self, api_visible: bool) -> Self {
        match self {
            Focus::Prompt if api_visible => Focus::ApiKey,
            Focus::Prompt => Focus::Knobs,
            Focus::Genre => Focus::Prompt,
            Focus::Mood => Focus::Genre,
            Focus::Knobs => Focus::Mood,
            Focus::ApiKey => Focus::Knobs,
        }
    }
}

/// Key event result
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Submit the current inputs
    Generate,
    /// Abort the running generation
    Abort,
    /// Toggle help
    ToggleHelp,
    /// Show or hide the API key panel
    ToggleApiPanel,
    /// Move focus forward
    FocusNext,
    /// Move focus back
    FocusPrev,
    /// Type into the prompt
    InsertChar(char),
    /// Delete the last prompt character
    DeleteChar,
    /// Select the next genre
    GenreNext,
    /// Select the previous genre
    GenrePrev,
    /// Select the next mood
    MoodNext,
    /// Select the previous mood
    MoodPrev,
    /// Move the knob cursor right
    KnobNext,
    /// Move the knob cursor left
    KnobPrev,
    /// Click the knob under the cursor
    ClickFocusedKnob,
    /// Click a specific knob (mouse)
    ClickKnob(KnobId),
    /// Type into the API key
    ApiKeyChar(char),
    /// Delete the last API key character
    ApiKeyDelete,
}

/// Translate a key press into an action for the focused panel
pub fn map_key(focus: Focus, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    // Global bindings first
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return KeyAction::Quit,
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => return KeyAction::Generate,
        (KeyCode::Char('k'), KeyModifiers::CONTROL) => return KeyAction::ToggleApiPanel,
        (KeyCode::F(1), _) => return KeyAction::ToggleHelp,
        (KeyCode::Esc, _) => return KeyAction::Abort,
        (KeyCode::Tab, _) => return KeyAction::FocusNext,
        (KeyCode::BackTab, _) => return KeyAction::FocusPrev,
        _ => {}
    }

    match focus {
        Focus::Prompt => match (code, modifiers) {
            (KeyCode::Enter, KeyModifiers::ALT) => KeyAction::InsertChar('\n'),
            (KeyCode::Enter, _) => KeyAction::Generate,
            (KeyCode::Backspace, _) => KeyAction::DeleteChar,
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                KeyAction::InsertChar(c)
            }
            _ => KeyAction::None,
        },
        Focus::Genre => match code {
            KeyCode::Left | KeyCode::Up => KeyAction::GenrePrev,
            KeyCode::Right | KeyCode::Down => KeyAction::GenreNext,
            KeyCode::Enter => KeyAction::Generate,
            _ => KeyAction::None,
        },
        Focus::Mood => match code {
            KeyCode::Left | KeyCode::Up => KeyAction::MoodPrev,
            KeyCode::Right | KeyCode::Down => KeyAction::MoodNext,
            KeyCode::Enter => KeyAction::Generate,
            _ => KeyAction::None,
        },
        Focus::Knobs => match code {
            KeyCode::Left => KeyAction::KnobPrev,
            KeyCode::Right => KeyAction::KnobNext,
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::ClickFocusedKnob,
            _ => KeyAction::None,
        },
        Focus::ApiKey => match (code, modifiers) {
            (KeyCode::Backspace, _) => KeyAction::ApiKeyDelete,
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                KeyAction::ApiKeyChar(c)
            }
            _ => KeyAction::None,
        },
    }
}

/// Screen regions that react to mouse clicks, refreshed every frame
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    knobs: Vec<(KnobId, Rect)>,
    button: Option<Rect>,
}

impl HitMap {
    /// Action for a left click at a terminal cell
    pub fn action_at(&self, column: u16, row: u16) -> KeyAction {
        let hit = |rect: &Rect| {
            column >= rect.x
                && column < rect.x + rect.width
                && row >= rect.y
                && row < rect.y + rect.height
        };
        if let Some((id, _)) = self.knobs.iter().find(|(_, rect)| hit(rect)) {
            return KeyAction::ClickKnob(*id);
        }
        if self.button.as_ref().is_some_and(hit) {
            return KeyAction::Generate;
        }
        KeyAction::None
    }
}

/// View-only state that does not belong to the console
#[derive(Debug)]
pub struct ViewState {
    /// Panel receiving keys
    pub focus: Focus,
    /// Knob under the keyboard cursor
    pub knob_focus: KnobId,
    /// Help overlay visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
    waveform: WaveformState,
    rng: StdRng,
    hit: HitMap,
    frame: u64,
}

impl ViewState {
    /// Fresh view with a waveform of `bars` bars
    pub fn new(bars: usize) -> Self {
        Self {
            focus: Focus::Prompt,
            knob_focus: KnobId::Tempo,
            show_help: false,
            status_message: None,
            status_time: None,
            waveform: WaveformState::new(bars),
            rng: StdRng::from_entropy(),
            hit: HitMap::default(),
            frame: 0,
        }
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }

    /// Regions clickable in the last drawn frame
    pub fn hit_map(&self) -> &HitMap {
        &self.hit
    }

    /// Apply an action to the console. Generating needs a tokio runtime.
    pub fn dispatch(&mut self, console: &mut Console, action: KeyAction) {
        match action {
            KeyAction::None | KeyAction::Quit => {}
            KeyAction::Generate => match console.submit() {
                SubmitOutcome::Started { run, .. } => {
                    self.set_status(format!("Generating ({})", run));
                }
                SubmitOutcome::IgnoredEmptyPrompt | SubmitOutcome::IgnoredBusy => {}
            },
            KeyAction::Abort => {
                if self.show_help {
                    self.show_help = false;
                } else if console.abort() {
                    self.set_status("Generation aborted");
                }
            }
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
            KeyAction::ToggleApiPanel => {
                console.input_mut().toggle_api_input();
                if !console.input().show_api_input() && self.focus == Focus::ApiKey {
                    self.focus = Focus::Prompt;
                } else if console.input().show_api_input() {
                    self.focus = Focus::ApiKey;
                }
            }
            KeyAction::FocusNext => {
                self.focus = self.focus.next(console.input().show_api_input());
            }
            KeyAction::FocusPrev => {
                self.focus = self.focus.prev(console.input().show_api_input());
            }
            KeyAction::InsertChar(c) => console.input_mut().insert_char(c),
            KeyAction::DeleteChar => console.input_mut().backspace(),
            KeyAction::GenreNext => console.input_mut().cycle_genre(true),
            KeyAction::GenrePrev => console.input_mut().cycle_genre(false),
            KeyAction::MoodNext => console.input_mut().cycle_mood(true),
            KeyAction::MoodPrev => console.input_mut().cycle_mood(false),
            KeyAction::KnobNext => self.knob_focus = self.knob_focus.next(),
            KeyAction::KnobPrev => self.knob_focus = self.knob_focus.prev(),
            KeyAction::ClickFocusedKnob => {
                let value = console.input_mut().click_knob(self.knob_focus);
                debug!(knob = ?self.knob_focus, value, "knob clicked");
            }
            KeyAction::ClickKnob(id) => {
                self.focus = Focus::Knobs;
                self.knob_focus = id;
                let value = console.input_mut().click_knob(id);
                debug!(knob = ?id, value, "knob clicked");
            }
            KeyAction::ApiKeyChar(c) => console.input_mut().push_api_key_char(c),
            KeyAction::ApiKeyDelete => console.input_mut().pop_api_key_char(),
        }
    }
}

/// Terminal UI application
pub struct App {
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// View state
    view: ViewState,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Take over the terminal
    pub fn new(frame_rate: u32, waveform_bars: usize) -> io::Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            view: ViewState::new(waveform_bars),
            frame_rate: frame_rate.clamp(1, 120),
            running: true,
        })
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Main loop: apply timer events, redraw, handle input.
    ///
    /// Must be called with a tokio runtime entered so submits can spawn
    /// their timers.
    pub fn run(&mut self, console: &mut Console) -> io::Result<()> {
        while self.is_running() {
            console.drain_pending();
            self.view.clear_expired_status();
            self.draw(console)?;

            let Some(event) = self.poll_event()? else {
                continue;
            };
            let action = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(self.view.focus, key.code, key.modifiers)
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    self.view.hit.action_at(mouse.column, mouse.row)
                }
                _ => KeyAction::None,
            };

            if action == KeyAction::Quit {
                self.quit();
            } else {
                self.view.dispatch(console, action);
            }
        }
        Ok(())
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, console: &Console) -> io::Result<()> {
        let view = &mut self.view;
        self.terminal.draw(|frame| render(frame, console, view))?;
        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the whole console into a frame
pub fn render(frame: &mut Frame, console: &Console, view: &mut ViewState) {
    view.frame = view.frame.wrapping_add(1);
    let waveform_active = console.controller().waveform_active();
    view.waveform.update(waveform_active, &mut view.rng);

    let area = frame.area();
    let api_height = if console.input().show_api_input() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),          // Header
            Constraint::Length(1),          // API key toggle
            Constraint::Length(api_height), // API key entry
            Constraint::Length(1),          // Module status
            Constraint::Length(7),          // Waveform monitor
            Constraint::Length(5),          // Prompt
            Constraint::Length(6),          // Genre / mood
            Constraint::Length(7),          // Knobs
            Constraint::Length(3),          // Generate button
            Constraint::Min(4),             // Results
            Constraint::Length(1),          // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], console.status());
    render_api_toggle(frame, chunks[1], console);
    if api_height > 0 {
        render_api_panel(frame, chunks[2], console, view.focus == Focus::ApiKey);
    }
    frame.render_widget(StatusWidget::new(console.status()), chunks[3]);
    render_waveform_monitor(frame, chunks[4], console, &view.waveform);
    render_prompt(frame, chunks[5], console, view.focus == Focus::Prompt);
    render_pickers(frame, chunks[6], console, view.focus);
    view.hit.knobs = render_knobs(frame, chunks[7], console, view);
    view.hit.button = Some(chunks[8]);
    render_generate_button(frame, chunks[8], console, view.frame);
    let results_block = Block::default()
        .borders(Borders::TOP)
        .border_style(border_style(false));
    frame.render_widget(
        ResultsWidget::new(console.results()).block(results_block),
        chunks[9],
    );
    render_status_bar(frame, chunks[10], console, view);

    if view.show_help {
        render_help_overlay(frame, area);
    }
}

/// Focus-dependent border style
fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the title with LED rows on both sides
fn render_header(frame: &mut Frame, area: Rect, status: GenerationStatus) {
    let led = StatusLed::orange(status.is_generating());
    let mut title = led_row(3, led);
    title.push(Span::styled(
        "  FORGE  ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    title.extend(led_row(3, led));

    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            "[ AI-POWERED MUSIC GENERATION CONSOLE ]",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render the API key toggle line
fn render_api_toggle(frame: &mut Frame, area: Rect, console: &Console) {
    let configured = console.input().has_api_key();
    let label = if configured {
        " API KEY CONFIGURED"
    } else {
        " CONFIGURE API KEY"
    };
    let line = Line::from(vec![
        StatusLed::new(configured, LedColor::Green).span(),
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled("  (Ctrl+K)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render the API key entry panel
fn render_api_panel(frame: &mut Frame, area: Rect, console: &Console, focused: bool) {
    let width = 50.min(area.width);
    let panel = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" API Key ")
        .title_bottom(Line::from(" stored locally, never sent ").alignment(Alignment::Right));

    let text = if console.input().has_api_key() {
        Span::styled(console.input().masked_api_key(), Style::default().fg(Color::Gray))
    } else {
        Span::styled("sk-...", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(text).block(block), panel);
}

/// Render the waveform bars, progress label and progress bar
fn render_waveform_monitor(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    waveform: &WaveformState,
) {
    let generating = console.status().is_generating();
    let progress = console.controller().progress();
    let label = if generating {
        format!(" {}% ", progress.floor() as u32)
    } else {
        " --- ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(false))
        .title(" WAVEFORM MONITOR ")
        .title(Line::from(Span::styled(label, Style::default().fg(ACCENT))).alignment(Alignment::Right));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if generating && inner.height > 1 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        frame.render_widget(WaveformWidget::new(waveform), rows[0]);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[1]);
    } else {
        frame.render_widget(WaveformWidget::new(waveform), inner);
    }
}

/// Render the prompt editor
fn render_prompt(frame: &mut Frame, area: Rect, console: &Console, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" SONG DESCRIPTION / LYRICS ");

    let prompt = console.input().prompt();
    let paragraph = if prompt.is_empty() && !focused {
        Paragraph::new(Span::styled(
            "Describe your song... lyrics, themes, instrumentation, details",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut text = prompt.to_string();
        if focused {
            text.push('▏');
        }
        Paragraph::new(text).style(Style::default().fg(Color::Gray))
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

/// Chip row with the selected entry highlighted
fn chips<'a>(names: impl Iterator<Item = (&'a str, bool)>) -> Line<'a> {
    let mut spans = Vec::new();
    for (name, selected) in names {
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", name), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render genre and mood pickers side by side
fn render_pickers(frame: &mut Frame, area: Rect, console: &Console, focus: Focus) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let genre = console.input().genre();
    let genre_line = chips(Genre::ALL.iter().map(|g| (g.name(), *g == genre)));
    let genre_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focus == Focus::Genre))
        .title(" GENRE ");
    frame.render_widget(
        Paragraph::new(genre_line)
            .block(genre_block)
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    let mood = console.input().mood();
    let mood_line = chips(Mood::ALL.iter().map(|m| (m.name(), *m == mood)));
    let mood_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focus == Focus::Mood))
        .title(" MOOD ");
    frame.render_widget(
        Paragraph::new(mood_line)
            .block(mood_block)
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

/// Render the three knobs; returns their screen regions
fn render_knobs(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    view: &ViewState,
) -> Vec<(KnobId, Rect)> {
    let focused = view.focus == Focus::Knobs;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" PARAMETERS ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    KnobId::ALL
        .iter()
        .zip(cells.iter())
        .map(|(id, cell)| {
            let widget = KnobWidget::new(console.input().knob(*id))
                .focused(focused && view.knob_focus == *id);
            frame.render_widget(widget, *cell);
            (*id, *cell)
        })
        .collect()
}

/// Render the generate button
fn render_generate_button(frame: &mut Frame, area: Rect, console: &Console, tick: u64) {
    let generating = console.status().is_generating();
    let (text, style) = if generating {
        let spinner = SPINNER[(tick / 4 % SPINNER.len() as u64) as usize];
        (
            format!("{} GENERATING...", spinner),
            Style::default().fg(Color::DarkGray),
        )
    } else if console.can_generate() {
        (
            "♪ GENERATE SONG".to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "♪ GENERATE SONG".to_string(),
            Style::default().fg(Color::Gray),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(console.can_generate()));
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, console: &Console, view: &ViewState) {
    let text = if let Some(ref msg) = view.status_message {
        Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))
    } else if let (GenerationStatus::Error, Some(reason)) =
        (console.status(), console.controller().last_error())
    {
        Span::styled(
            format!(" Generation failed: {}", reason),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled(
            " Tab: Focus | Enter/Ctrl+G: Generate | Esc: Abort | Ctrl+K: API key | F1: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    // Calculate centered area
    let width = 50.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    // Clear background
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Generation", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Enter/Ctrl+G  Generate song"),
        Line::from("  Esc           Abort generation"),
        Line::from(""),
        Line::from(Span::styled("Inputs", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Tab/Shift+Tab Move focus"),
        Line::from("  Alt+Enter     New line in prompt"),
        Line::from("  Left/Right    Pick genre, mood or knob"),
        Line::from("  Enter/Space   Click focused knob"),
        Line::from("  Mouse click   Click knob or button"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+K        Toggle API key panel"),
        Line::from("  F1            Toggle help"),
        Line::from("  Ctrl+C        Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForgeConfig;
    use ratatui::backend::TestBackend;

    fn console() -> Console {
        let mut config = ForgeConfig::default();
        config.simulation.seed = Some(21);
        Console::new(config).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_global_keys() {
        for focus in [Focus::Prompt, Focus::Genre, Focus::Knobs, Focus::ApiKey] {
            assert_eq!(
                map_key(focus, KeyCode::Char('c'), KeyModifiers::CONTROL),
                KeyAction::Quit
            );
            assert_eq!(map_key(focus, KeyCode::Esc, KeyModifiers::NONE), KeyAction::Abort);
            assert_eq!(map_key(focus, KeyCode::F(1), KeyModifiers::NONE), KeyAction::ToggleHelp);
            assert_eq!(map_key(focus, KeyCode::Tab, KeyModifiers::NONE), KeyAction::FocusNext);
        }
    }

    #[test]
    fn test_prompt_keys() {
        assert_eq!(
            map_key(Focus::Prompt, KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::InsertChar('q')
        );
        assert_eq!(
            map_key(Focus::Prompt, KeyCode::Char('Q'), KeyModifiers::SHIFT),
            KeyAction::InsertChar('Q')
        );
        assert_eq!(
            map_key(Focus::Prompt, KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::Generate
        );
        assert_eq!(
            map_key(Focus::Prompt, KeyCode::Enter, KeyModifiers::ALT),
            KeyAction::InsertChar('\n')
        );
    }

    #[test]
    fn test_panel_keys() {
        assert_eq!(
            map_key(Focus::Genre, KeyCode::Right, KeyModifiers::NONE),
            KeyAction::GenreNext
        );
        assert_eq!(
            map_key(Focus::Mood, KeyCode::Left, KeyModifiers::NONE),
            KeyAction::MoodPrev
        );
        assert_eq!(
            map_key(Focus::Knobs, KeyCode::Char(' '), KeyModifiers::NONE),
            KeyAction::ClickFocusedKnob
        );
        assert_eq!(
            map_key(Focus::Knobs, KeyCode::Char('x'), KeyModifiers::NONE),
            KeyAction::None
        );
        assert_eq!(
            map_key(Focus::ApiKey, KeyCode::Char('s'), KeyModifiers::NONE),
            KeyAction::ApiKeyChar('s')
        );
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Knobs.next(false), Focus::Prompt);
        assert_eq!(Focus::Knobs.next(true), Focus::ApiKey);
        assert_eq!(Focus::ApiKey.next(true), Focus::Prompt);
        assert_eq!(Focus::Prompt.prev(false), Focus::Knobs);
        assert_eq!(Focus::Prompt.prev(true), Focus::ApiKey);
    }

    #[test]
    fn test_hit_map() {
        let hit = HitMap {
            knobs: vec![(KnobId::Energy, Rect::new(10, 5, 8, 5))],
            button: Some(Rect::new(0, 20, 40, 3)),
        };
        assert_eq!(hit.action_at(12, 7), KeyAction::ClickKnob(KnobId::Energy));
        assert_eq!(hit.action_at(18, 7), KeyAction::None);
        assert_eq!(hit.action_at(5, 21), KeyAction::Generate);
        assert_eq!(hit.action_at(5, 0), KeyAction::None);
    }

    #[test]
    fn test_dispatch_edits_inputs() {
        let mut console = console();
        let mut view = ViewState::new(32);

        for c in "hi".chars() {
            view.dispatch(&mut console, KeyAction::InsertChar(c));
        }
        view.dispatch(&mut console, KeyAction::GenreNext);
        view.dispatch(&mut console, KeyAction::MoodPrev);
        view.dispatch(&mut console, KeyAction::KnobNext);
        view.dispatch(&mut console, KeyAction::ClickFocusedKnob);

        assert_eq!(console.input().prompt(), "hi");
        assert_eq!(console.input().genre(), Genre::LoFiHipHop);
        assert_eq!(console.input().mood(), Mood::Dreamy);
        assert_eq!(console.input().knob(KnobId::Energy).value(), 80);
    }

    #[test]
    fn test_dispatch_mouse_knob_click_moves_focus() {
        let mut console = console();
        let mut view = ViewState::new(32);
        view.dispatch(&mut console, KeyAction::ClickKnob(KnobId::Tempo));
        assert_eq!(view.focus, Focus::Knobs);
        assert_eq!(console.input().knob(KnobId::Tempo).value(), 130);
    }

    #[test]
    fn test_api_panel_focus() {
        let mut console = console();
        let mut view = ViewState::new(32);

        view.dispatch(&mut console, KeyAction::ToggleApiPanel);
        assert!(console.input().show_api_input());
        assert_eq!(view.focus, Focus::ApiKey);
        view.dispatch(&mut console, KeyAction::ApiKeyChar('k'));
        assert_eq!(console.input().api_key(), "k");

        view.dispatch(&mut console, KeyAction::ToggleApiPanel);
        assert_eq!(view.focus, Focus::Prompt);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_generate_and_abort() {
        let mut console = console();
        let mut view = ViewState::new(32);

        view.dispatch(&mut console, KeyAction::Generate);
        assert_eq!(console.status(), GenerationStatus::Idle);
        assert!(view.status_message.is_none());

        view.dispatch(&mut console, KeyAction::InsertChar('x'));
        view.dispatch(&mut console, KeyAction::Generate);
        assert_eq!(console.status(), GenerationStatus::Generating);

        view.dispatch(&mut console, KeyAction::Abort);
        assert_eq!(console.status(), GenerationStatus::Idle);
        assert_eq!(view.status_message.as_deref(), Some("Generation aborted"));
    }

    #[test]
    fn test_render_idle_console() {
        let console = console();
        let mut view = ViewState::new(32);
        let mut terminal = Terminal::new(TestBackend::new(110, 48)).unwrap();
        terminal
            .draw(|frame| render(frame, &console, &mut view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("FORGE"));
        assert!(text.contains("STANDBY"));
        assert!(text.contains("CONFIGURE API KEY"));
        assert!(text.contains("Synthwave"));
        assert!(text.contains("TEMPO"));
        assert!(text.contains("GENERATE SONG"));
        assert!(text.contains("---"));
        assert_eq!(view.hit_map().knobs.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_generating_console() {
        let mut console = console();
        let mut view = ViewState::new(32);
        console.input_mut().set_prompt("neon nights");
        console.submit();

        let mut terminal = Terminal::new(TestBackend::new(110, 48)).unwrap();
        terminal
            .draw(|frame| render(frame, &console, &mut view))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("PROCESSING"));
        assert!(text.contains("GENERATING..."));
        assert!(text.contains("0%"));
    }

    #[test]
    fn test_status_expiry() {
        let mut view = ViewState::new(8);
        view.set_status("hello");
        view.clear_expired_status();
        assert_eq!(view.status_message.as_deref(), Some("hello"));

        view.status_time = Some(Instant::now() - Duration::from_secs(5));
        view.clear_expired_status();
        assert!(view.status_message.is_none());
    }
}
