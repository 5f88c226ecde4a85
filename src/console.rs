// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The console: single owner of all UI state.
//!
//! Timer tasks talk to the console only through its event channel; the
//! console applies events one at a time, which keeps the controller the
//! only writer of status, progress, waveform flag and results.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::config::ForgeConfig;
use crate::error::Result;
use crate::generation::{
    spawn_run, GenerationController, GenerationStatus, RunEvent, RunTasks, SubmitOutcome,
};
use crate::input::InputPanel;
use crate::song::{GeneratedSong, ResultsList, SongFactory};

/// Reason attached to runs that fail through failure injection
pub const SIMULATED_FAILURE: &str = "simulated generation failure";

/// Console state plus the event channel its timers report into
pub struct Console {
    config: ForgeConfig,
    input: InputPanel,
    controller: GenerationController,
    results: ResultsList,
    factory: SongFactory,
    failure_rng: StdRng,
    events_tx: UnboundedSender<RunEvent>,
    events_rx: UnboundedReceiver<RunEvent>,
    tasks: Option<RunTasks>,
}

impl Console {
    /// Build a console from validated configuration
    pub fn new(config: ForgeConfig) -> Result<Self> {
        config.validate()?;
        let input = InputPanel::from_config(&config.defaults)?;
        let seed = config.simulation.seed;
        let failure_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.rotate_left(32)),
            None => StdRng::from_entropy(),
        };
        let (events_tx, events_rx) = unbounded_channel();

        Ok(Self {
            config,
            input,
            controller: GenerationController::new(),
            results: ResultsList::new(),
            factory: SongFactory::new(seed),
            failure_rng,
            events_tx,
            events_rx,
            tasks: None,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Input panel
    pub fn input(&self) -> &InputPanel {
        &self.input
    }

    /// Mutable input panel
    pub fn input_mut(&mut self) -> &mut InputPanel {
        &mut self.input
    }

    /// Generation controller
    pub fn controller(&self) -> &GenerationController {
        &self.controller
    }

    /// Generated songs, newest first
    pub fn results(&self) -> &ResultsList {
        &self.results
    }

    /// Current status
    pub fn status(&self) -> GenerationStatus {
        self.controller.status()
    }

    /// Whether the generate button is enabled
    pub fn can_generate(&self) -> bool {
        self.input.can_generate(self.controller.status())
    }

    /// Submit the current inputs. Must run inside a tokio runtime.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.controller.submit(self.input.snapshot());
        if let SubmitOutcome::Started { run, token } = &outcome {
            self.tasks = Some(spawn_run(
                *run,
                token.clone(),
                &self.config.timing,
                self.config.simulation.seed,
                self.events_tx.clone(),
            ));
        }
        outcome
    }

    /// Abort a run in flight
    pub fn abort(&mut self) -> bool {
        let aborted = self.controller.cancel();
        if aborted {
            if let Some(tasks) = self.tasks.take() {
                tasks.abort();
            }
        }
        aborted
    }

    /// Apply one timer event; returns whether state changed
    pub fn apply(&mut self, event: RunEvent) -> bool {
        match event {
            RunEvent::Progress { run, step } => self.controller.apply_progress(run, step),
            RunEvent::WaveformToggle { run } => self.controller.toggle_waveform(run),
            RunEvent::Finished { run } => {
                if !self.controller.is_current(run) {
                    debug!(%run, "dropping completion from stale run");
                    return false;
                }
                if self.roll_failure() {
                    return self.controller.fail(run, SIMULATED_FAILURE);
                }
                match self.controller.complete(run) {
                    Some(request) => {
                        let song = self.factory.fabricate(&request, Utc::now());
                        info!(
                            id = song.id(),
                            title = song.title(),
                            genre = %song.genre(),
                            duration = %song.duration(),
                            "song fabricated"
                        );
                        self.results.prepend(song);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Apply every event already queued; returns how many changed state
    pub fn drain_pending(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                changed += 1;
            }
        }
        self.reap_tasks();
        changed
    }

    /// Wait for the next timer event and apply it
    pub async fn step(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Apply events until the run in flight completes, fails or is aborted
    pub async fn run_until_settled(&mut self) {
        while self.controller.status().is_generating() {
            self.step().await;
        }
        if let Some(tasks) = self.tasks.take() {
            tasks.join().await;
        }
    }

    /// Most recent song, if any
    pub fn latest_song(&self) -> Option<&GeneratedSong> {
        self.results.latest()
    }

    /// Hand exited timers of a settled run to a joiner that logs panics
    fn reap_tasks(&mut self) {
        let settled = !self.controller.status().is_generating()
            && self.tasks.as_ref().is_some_and(|t| t.is_finished());
        if settled {
            if let Some(tasks) = self.tasks.take() {
                tokio::spawn(tasks.join());
            }
        }
    }

    fn roll_failure(&mut self) -> bool {
        let rate = self.config.simulation.failure_rate;
        rate > 0.0 && self.failure_rng.gen::<f64>() < rate
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if self.controller.cancel() {
            debug!("console dropped with a run in flight");
        }
        if let Some(tasks) = self.tasks.take() {
            tasks.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Genre;
    use std::time::Duration;

    fn seeded_config() -> ForgeConfig {
        let mut config = ForgeConfig::default();
        config.simulation.seed = Some(11);
        config
    }

    #[test]
    fn test_new_console_is_idle() {
        let console = Console::new(ForgeConfig::default()).unwrap();
        assert_eq!(console.status(), GenerationStatus::Idle);
        assert!(console.results().is_empty());
        assert!(!console.can_generate());
        assert_eq!(console.config().ui.waveform_bars, 32);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ForgeConfig::default();
        config.timing.generation_ms = 0;
        assert!(Console::new(config).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_prompt_submit_is_noop() {
        let mut console = Console::new(seeded_config()).unwrap();
        console.input_mut().set_prompt("   ");

        assert!(matches!(console.submit(), SubmitOutcome::IgnoredEmptyPrompt));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(console.drain_pending(), 0);
        assert_eq!(console.status(), GenerationStatus::Idle);
        assert!(console.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_produces_one_song() {
        let mut console = Console::new(seeded_config()).unwrap();
        console.input_mut().set_prompt("a calm piano piece");

        assert!(console.submit().is_started());
        assert_eq!(console.status(), GenerationStatus::Generating);
        assert!(!console.can_generate());

        console.run_until_settled().await;
        assert_eq!(console.status(), GenerationStatus::Complete);
        assert_eq!(console.controller().progress(), 100.0);
        assert_eq!(console.results().len(), 1);
        assert!(console.tasks.is_none());

        let song = console.latest_song().unwrap();
        assert_eq!(song.prompt(), "a calm piano piece");
        assert_eq!(song.genre(), Genre::Synthwave);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_discards_run() {
        let mut console = Console::new(seeded_config()).unwrap();
        console.input_mut().set_prompt("x");
        console.submit();

        tokio::time::sleep(Duration::from_secs(2)).await;
        console.drain_pending();
        assert!(console.controller().progress() > 0.0);

        assert!(console.abort());
        assert!(console.tasks.is_none());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(console.drain_pending(), 0);
        assert_eq!(console.status(), GenerationStatus::Idle);
        assert!(console.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_certain_failure_reaches_error() {
        let mut config = seeded_config();
        config.simulation.failure_rate = 1.0;
        let mut console = Console::new(config).unwrap();
        console.input_mut().set_prompt("doomed");
        console.submit();

        console.run_until_settled().await;
        assert_eq!(console.status(), GenerationStatus::Error);
        assert_eq!(console.controller().last_error(), Some(SIMULATED_FAILURE));
        assert!(console.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_reaps_exited_timers() {
        let mut console = Console::new(seeded_config()).unwrap();
        console.input_mut().set_prompt("reaped");
        console.submit();

        tokio::time::sleep(Duration::from_millis(8_100)).await;
        console.drain_pending();
        assert_eq!(console.status(), GenerationStatus::Complete);

        // Cancelled timers exit on their next poll
        tokio::time::sleep(Duration::from_millis(10)).await;
        console.drain_pending();
        assert!(console.tasks.is_none());
    }
}
