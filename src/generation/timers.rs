// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The three scheduled callbacks of a generation run.
//!
//! Each run spawns a progress ticker, a waveform toggle and a one-shot
//! completion timer. All three wait on the run's [`CancelToken`] alongside
//! their timer and check it again before sending, so nothing is emitted
//! once the run has been cancelled.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{trace, warn};

use super::{CancelToken, RunEvent, RunId, PROGRESS_MAX};
use crate::config::TimingConfig;

/// Join handles of a run's timer tasks
#[derive(Debug)]
pub struct RunTasks {
    run: RunId,
    handles: Vec<JoinHandle<()>>,
}

impl RunTasks {
    /// Whether every timer task has exited
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|h| h.is_finished())
    }

    /// Stop the tasks without waiting for them
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    /// Wait for every timer task to exit; returns how many panicked
    pub async fn join(self) -> usize {
        let mut panicked = 0;
        for handle in self.handles {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    warn!(run = %self.run, "timer task panicked");
                    panicked += 1;
                }
            }
        }
        panicked
    }
}

/// Spawn the timers of `run` on the current tokio runtime.
///
/// `seed` makes the progress increments reproducible; the run id is mixed
/// in so consecutive runs differ.
pub fn spawn_run(
    run: RunId,
    token: CancelToken,
    timing: &TimingConfig,
    seed: Option<u64>,
    events: UnboundedSender<RunEvent>,
) -> RunTasks {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run.value())),
        None => StdRng::from_entropy(),
    };

    let handles = vec![
        tokio::spawn(progress_ticker(
            run,
            token.clone(),
            timing.progress_interval(),
            timing.max_progress_step,
            rng,
            events.clone(),
        )),
        tokio::spawn(waveform_toggle(
            run,
            token.clone(),
            timing.waveform_interval(),
            events.clone(),
        )),
        tokio::spawn(completion(run, token, timing.generation_duration(), events)),
    ];

    RunTasks { run, handles }
}

/// Fires every `period` with a step in `[0, max_step)` until the emitted
/// total reaches 100.
async fn progress_ticker(
    run: RunId,
    token: CancelToken,
    period: Duration,
    max_step: f64,
    mut rng: StdRng,
    events: UnboundedSender<RunEvent>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut emitted = 0.0;

    while emitted < PROGRESS_MAX {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if token.is_cancelled() {
            break;
        }

        let step = rng.gen_range(0.0..max_step);
        emitted += step;
        if events.send(RunEvent::Progress { run, step }).is_err() {
            break;
        }
    }
    trace!(%run, emitted, "progress ticker stopped");
}

/// Fires every `period` until cancelled.
async fn waveform_toggle(
    run: RunId,
    token: CancelToken,
    period: Duration,
    events: UnboundedSender<RunEvent>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if token.is_cancelled() {
            break;
        }
        if events.send(RunEvent::WaveformToggle { run }).is_err() {
            break;
        }
    }
    trace!(%run, "waveform toggle stopped");
}

/// Fires once after `after`.
async fn completion(
    run: RunId,
    token: CancelToken,
    after: Duration,
    events: UnboundedSender<RunEvent>,
) {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            trace!(%run, "completion timer cancelled");
            return;
        }
        _ = sleep(after) => {}
    }
    if !token.is_cancelled() {
        let _ = events.send(RunEvent::Finished { run });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationController, SubmitOutcome};
    use crate::input::InputPanel;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn start_run() -> (GenerationController, RunId, CancelToken) {
        let mut panel = InputPanel::default();
        panel.set_prompt("timer test");
        let mut controller = GenerationController::new();
        match controller.submit(panel.snapshot()) {
            SubmitOutcome::Started { run, token } => (controller, run, token),
            other => panic!("expected start, got {:?}", other),
        }
    }

    fn drain(rx: &mut UnboundedReceiver<RunEvent>) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_cadence_over_one_second() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let _tasks = spawn_run(run, token, &TimingConfig::default(), Some(1), tx);

        sleep(Duration::from_millis(1010)).await;
        let events = drain(&mut rx);

        let progress = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Progress { .. }))
            .count();
        let toggles = events
            .iter()
            .filter(|e| matches!(e, RunEvent::WaveformToggle { .. }))
            .count();
        assert_eq!(progress, 5);
        assert_eq!(toggles, 6);
        assert!(!events.iter().any(|e| matches!(e, RunEvent::Finished { .. })));
        assert!(events.iter().all(|e| e.run() == run));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_steps_in_range() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let _tasks = spawn_run(run, token, &TimingConfig::default(), Some(2), tx);

        sleep(Duration::from_millis(4000)).await;
        for event in drain(&mut rx) {
            if let RunEvent::Progress { step, .. } = event {
                assert!((0.0..3.0).contains(&step), "step {} out of range", step);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_fires_once_after_deadline() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let _tasks = spawn_run(run, token, &TimingConfig::default(), Some(3), tx);

        sleep(Duration::from_millis(7990)).await;
        assert!(!drain(&mut rx)
            .iter()
            .any(|e| matches!(e, RunEvent::Finished { .. })));

        sleep(Duration::from_millis(20)).await;
        let finished = drain(&mut rx)
            .iter()
            .filter(|e| matches!(e, RunEvent::Finished { .. }))
            .count();
        assert_eq!(finished, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_all_timers() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let tasks = spawn_run(run, token.clone(), &TimingConfig::default(), Some(4), tx);

        sleep(Duration::from_millis(1000)).await;
        token.cancel();
        drain(&mut rx);

        assert_eq!(tasks.join().await, 0);
        sleep(Duration::from_secs(10)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_tasks() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let tasks = spawn_run(run, token, &TimingConfig::default(), Some(6), tx);

        sleep(Duration::from_millis(500)).await;
        assert!(!tasks.is_finished());
        tasks.abort();
        drain(&mut rx);

        assert_eq!(tasks.join().await, 0);
        sleep(Duration::from_secs(10)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_counts_panicked_task() {
        let (_controller, run, token) = start_run();
        let (tx, _rx) = unbounded_channel();
        let timing = TimingConfig {
            max_progress_step: f64::INFINITY,
            ..TimingConfig::default()
        };
        let tasks = spawn_run(run, token.clone(), &timing, Some(7), tx);

        // The first progress tick cannot sample an unbounded step
        sleep(Duration::from_millis(300)).await;
        token.cancel();
        assert_eq!(tasks.join().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_ticker_stops_at_hundred() {
        let (_controller, run, token) = start_run();
        let (tx, mut rx) = unbounded_channel();
        let timing = TimingConfig {
            generation_ms: 60_000,
            max_progress_step: 50.0,
            ..TimingConfig::default()
        };
        let _tasks = spawn_run(run, token.clone(), &timing, Some(5), tx);

        sleep(Duration::from_secs(30)).await;
        let total: f64 = drain(&mut rx)
            .iter()
            .filter_map(|e| match e {
                RunEvent::Progress { step, .. } => Some(*step),
                _ => None,
            })
            .sum();
        assert!(total >= PROGRESS_MAX);
        assert!(total < PROGRESS_MAX + 50.0);

        sleep(Duration::from_secs(5)).await;
        assert!(!drain(&mut rx)
            .iter()
            .any(|e| matches!(e, RunEvent::Progress { .. })));
        token.cancel();
    }
}
