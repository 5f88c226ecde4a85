// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Simulated generation state machine.
//!
//! `Idle -> Generating -> Complete`, with `Error` reached only through
//! failure injection. A run is identified by a [`RunId`] and owns a
//! [`CancelToken`]; every timer event names its run, and events for any
//! run other than the one in flight are dropped.

pub mod cancel;
pub mod timers;

pub use cancel::CancelToken;
pub use timers::{spawn_run, RunTasks};

use std::fmt;

use tracing::{debug, info, warn};

use crate::input::GenerationRequest;

/// Progress value at which a run is visually finished
pub const PROGRESS_MAX: f64 = 100.0;

/// Controller status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    Complete,
    Error,
}

impl GenerationStatus {
    /// Console label for the status
    pub fn label(self) -> &'static str {
        match self {
            GenerationStatus::Idle => "STANDBY",
            GenerationStatus::Generating => "PROCESSING",
            GenerationStatus::Complete => "READY",
            GenerationStatus::Error => "ERROR",
        }
    }

    /// Whether a run is in flight
    pub fn is_generating(self) -> bool {
        self == GenerationStatus::Generating
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Event emitted by a run's timers
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Progress ticker fired with a random increment
    Progress { run: RunId, step: f64 },
    /// Waveform cadence fired
    WaveformToggle { run: RunId },
    /// Completion deadline reached
    Finished { run: RunId },
}

impl RunEvent {
    /// Run the event belongs to
    pub fn run(&self) -> RunId {
        match self {
            RunEvent::Progress { run, .. }
            | RunEvent::WaveformToggle { run }
            | RunEvent::Finished { run } => *run,
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// A new run started; its timers must honour `token`
    Started { run: RunId, token: CancelToken },
    /// Prompt was empty or whitespace; nothing changed
    IgnoredEmptyPrompt,
    /// A run is already in flight; nothing changed
    IgnoredBusy,
}

impl SubmitOutcome {
    /// Whether a run was started
    pub fn is_started(&self) -> bool {
        matches!(self, SubmitOutcome::Started { .. })
    }
}

#[derive(Debug)]
struct ActiveRun {
    id: RunId,
    token: CancelToken,
    request: GenerationRequest,
}

/// Status, progress and waveform state of the console
#[derive(Debug, Default)]
pub struct GenerationController {
    status: GenerationStatus,
    progress: f64,
    waveform_active: bool,
    active: Option<ActiveRun>,
    runs_started: u64,
    last_error: Option<String>,
}

impl GenerationController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Progress in percent (0 - 100)
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Waveform activity flag
    pub fn waveform_active(&self) -> bool {
        self.waveform_active
    }

    /// Run currently in flight
    pub fn current_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|run| run.id)
    }

    /// Request captured for the run in flight
    pub fn current_request(&self) -> Option<&GenerationRequest> {
        self.active.as_ref().map(|run| &run.request)
    }

    /// Reason of the last failed run
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether `run` is the run in flight
    pub fn is_current(&self, run: RunId) -> bool {
        self.status.is_generating() && self.current_run() == Some(run)
    }

    /// Start a run from a request snapshot
    pub fn submit(&mut self, request: GenerationRequest) -> SubmitOutcome {
        if self.status.is_generating() {
            debug!("submit ignored: generation already in flight");
            return SubmitOutcome::IgnoredBusy;
        }
        if !request.has_prompt() {
            debug!("submit ignored: empty prompt");
            return SubmitOutcome::IgnoredEmptyPrompt;
        }

        self.runs_started += 1;
        let run = RunId(self.runs_started);
        let token = CancelToken::new();

        self.status = GenerationStatus::Generating;
        self.progress = 0.0;
        self.waveform_active = true;
        self.last_error = None;
        self.active = Some(ActiveRun {
            id: run,
            token: token.clone(),
            request,
        });

        info!(%run, "generation started");
        SubmitOutcome::Started { run, token }
    }

    /// Add a progress increment, clamped at 100
    pub fn apply_progress(&mut self, run: RunId, step: f64) -> bool {
        if !self.accepts(run, "progress") {
            return false;
        }
        self.progress = (self.progress + step.max(0.0)).min(PROGRESS_MAX);
        true
    }

    /// Flip the waveform flag
    pub fn toggle_waveform(&mut self, run: RunId) -> bool {
        if !self.accepts(run, "waveform") {
            return false;
        }
        self.waveform_active = !self.waveform_active;
        true
    }

    /// Finish the run; returns its request so a record can be built
    pub fn complete(&mut self, run: RunId) -> Option<GenerationRequest> {
        if !self.accepts(run, "completion") {
            return None;
        }
        let active = self.finish_active()?;
        self.status = GenerationStatus::Complete;
        self.progress = PROGRESS_MAX;
        info!(%run, "generation complete");
        Some(active.request)
    }

    /// End the run in the error state
    pub fn fail(&mut self, run: RunId, reason: impl Into<String>) -> bool {
        if !self.accepts(run, "failure") {
            return false;
        }
        let reason = reason.into();
        self.finish_active();
        self.status = GenerationStatus::Error;
        warn!(%run, %reason, "generation failed");
        self.last_error = Some(reason);
        true
    }

    /// Abort the run in flight and return to idle
    pub fn cancel(&mut self) -> bool {
        if !self.status.is_generating() {
            return false;
        }
        if let Some(active) = self.finish_active() {
            warn!(run = %active.id, "generation aborted");
        }
        self.status = GenerationStatus::Idle;
        self.progress = 0.0;
        true
    }

    fn accepts(&self, run: RunId, what: &str) -> bool {
        let current = self.is_current(run);
        if !current {
            debug!(%run, what, "dropping event from stale run");
        }
        current
    }

    fn finish_active(&mut self) -> Option<ActiveRun> {
        self.waveform_active = false;
        let active = self.active.take()?;
        active.token.cancel();
        Some(active)
    }
}

impl Drop for GenerationController {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Genre, Mood};

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            genre: Genre::Synthwave,
            mood: Mood::Energetic,
            tempo: 120,
            energy: 70,
            complexity: 50,
        }
    }

    fn start(controller: &mut GenerationController, prompt: &str) -> (RunId, CancelToken) {
        match controller.submit(request(prompt)) {
            SubmitOutcome::Started { run, token } => (run, token),
            other => panic!("expected start, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = GenerationController::new();
        assert_eq!(controller.status(), GenerationStatus::Idle);
        assert_eq!(controller.progress(), 0.0);
        assert!(!controller.waveform_active());
        assert!(controller.current_run().is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(GenerationStatus::Idle.label(), "STANDBY");
        assert_eq!(GenerationStatus::Generating.label(), "PROCESSING");
        assert_eq!(GenerationStatus::Complete.label(), "READY");
        assert_eq!(GenerationStatus::Error.label(), "ERROR");
    }

    #[test]
    fn test_empty_prompt_is_ignored() {
        let mut controller = GenerationController::new();
        assert!(matches!(
            controller.submit(request("")),
            SubmitOutcome::IgnoredEmptyPrompt
        ));
        assert!(matches!(
            controller.submit(request(" \t\n ")),
            SubmitOutcome::IgnoredEmptyPrompt
        ));
        assert_eq!(controller.status(), GenerationStatus::Idle);
    }

    #[test]
    fn test_submit_starts_run() {
        let mut controller = GenerationController::new();
        let (run, token) = start(&mut controller, "a calm piano piece");

        assert_eq!(controller.status(), GenerationStatus::Generating);
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.waveform_active());
        assert_eq!(controller.current_run(), Some(run));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_submit_while_generating_is_ignored() {
        let mut controller = GenerationController::new();
        let (run, _token) = start(&mut controller, "first");

        assert!(matches!(
            controller.submit(request("second")),
            SubmitOutcome::IgnoredBusy
        ));
        assert_eq!(controller.current_run(), Some(run));
        assert_eq!(controller.current_request().unwrap().prompt, "first");
    }

    #[test]
    fn test_progress_clamps_at_max() {
        let mut controller = GenerationController::new();
        let (run, _token) = start(&mut controller, "x");

        for _ in 0..60 {
            assert!(controller.apply_progress(run, 2.9));
        }
        assert_eq!(controller.progress(), PROGRESS_MAX);
    }

    #[test]
    fn test_waveform_toggles() {
        let mut controller = GenerationController::new();
        let (run, _token) = start(&mut controller, "x");

        assert!(controller.toggle_waveform(run));
        assert!(!controller.waveform_active());
        assert!(controller.toggle_waveform(run));
        assert!(controller.waveform_active());
    }

    #[test]
    fn test_complete_forces_full_progress() {
        let mut controller = GenerationController::new();
        let (run, token) = start(&mut controller, "x");
        controller.apply_progress(run, 12.5);

        let request = controller.complete(run).unwrap();
        assert_eq!(request.prompt, "x");
        assert_eq!(controller.status(), GenerationStatus::Complete);
        assert_eq!(controller.progress(), PROGRESS_MAX);
        assert!(!controller.waveform_active());
        assert!(token.is_cancelled());
        assert!(controller.current_run().is_none());
    }

    #[test]
    fn test_events_after_complete_are_dropped() {
        let mut controller = GenerationController::new();
        let (run, _token) = start(&mut controller, "x");
        controller.complete(run).unwrap();

        assert!(!controller.apply_progress(run, 1.0));
        assert!(!controller.toggle_waveform(run));
        assert!(controller.complete(run).is_none());
        assert_eq!(controller.progress(), PROGRESS_MAX);
        assert!(!controller.waveform_active());
    }

    #[test]
    fn test_resubmit_after_complete() {
        let mut controller = GenerationController::new();
        let (first, _) = start(&mut controller, "one");
        controller.complete(first).unwrap();

        let (second, _) = start(&mut controller, "two");
        assert_ne!(first, second);
        assert_eq!(controller.status(), GenerationStatus::Generating);
        assert_eq!(controller.progress(), 0.0);

        // A late event from the first run must not touch the second
        assert!(!controller.apply_progress(first, 50.0));
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut controller = GenerationController::new();
        let (run, token) = start(&mut controller, "x");
        controller.apply_progress(run, 20.0);

        assert!(controller.cancel());
        assert!(token.is_cancelled());
        assert_eq!(controller.status(), GenerationStatus::Idle);
        assert_eq!(controller.progress(), 0.0);
        assert!(!controller.waveform_active());
        assert!(controller.complete(run).is_none());

        assert!(!controller.cancel());
    }

    #[test]
    fn test_fail_sets_error() {
        let mut controller = GenerationController::new();
        let (run, token) = start(&mut controller, "x");

        assert!(controller.fail(run, "simulated generation failure"));
        assert_eq!(controller.status(), GenerationStatus::Error);
        assert_eq!(controller.last_error(), Some("simulated generation failure"));
        assert!(token.is_cancelled());

        // Error is not terminal
        let (_run, _token) = start(&mut controller, "again");
        assert!(controller.last_error().is_none());
    }

    #[test]
    fn test_drop_cancels_run() {
        let mut controller = GenerationController::new();
        let (_run, token) = start(&mut controller, "x");
        drop(controller);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_event_accessor() {
        let mut controller = GenerationController::new();
        let (run, _token) = start(&mut controller, "x");
        assert_eq!(RunEvent::Finished { run }.run(), run);
        assert_eq!(RunEvent::Progress { run, step: 1.0 }.run(), run);
    }
}
