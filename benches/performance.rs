// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for FORGE
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the work done per frame and per timer event.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use forge::catalog::{Genre, Mood};
use forge::song::SongFactory;
use forge::ui::{bar_heights, WaveformState, WaveformWidget};
use forge::{GenerationController, GenerationRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: "driving synths under a neon skyline".to_string(),
        genre: Genre::Synthwave,
        mood: Mood::Energetic,
        tempo: 120,
        energy: 70,
        complexity: 50,
    }
}

/// Benchmark building a result record
fn bench_song_fabrication(c: &mut Criterion) {
    let mut factory = SongFactory::new(Some(1));
    let request = request();
    let now = Utc::now();

    c.bench_function("fabricate_song", |b| {
        b.iter(|| black_box(factory.fabricate(black_box(&request), now)))
    });
}

/// Benchmark waveform generation and rendering (per frame work)
fn bench_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("waveform");
    let mut rng = StdRng::seed_from_u64(7);

    for bars in [16usize, 32, 64].iter() {
        group.bench_with_input(BenchmarkId::new("heights", bars), bars, |b, &bars| {
            b.iter(|| black_box(bar_heights(bars, true, &mut rng)))
        });

        group.bench_with_input(BenchmarkId::new("render", bars), bars, |b, &bars| {
            let mut state = WaveformState::new(bars);
            state.update(true, &mut StdRng::seed_from_u64(3));
            let area = Rect::new(0, 0, 140, 5);
            b.iter(|| {
                let mut buf = Buffer::empty(area);
                WaveformWidget::new(&state).render(area, &mut buf);
                black_box(buf)
            })
        });
    }

    group.finish();
}

/// Benchmark applying timer events to the controller
fn bench_controller_events(c: &mut Criterion) {
    c.bench_function("progress_run", |b| {
        b.iter(|| {
            let mut controller = GenerationController::new();
            let run = match controller.submit(request()) {
                forge::SubmitOutcome::Started { run, .. } => run,
                _ => unreachable!(),
            };
            for _ in 0..40 {
                controller.apply_progress(run, black_box(2.5));
                controller.toggle_waveform(run);
            }
            black_box(controller.complete(run))
        })
    });
}

criterion_group!(
    benches,
    bench_song_fabrication,
    bench_waveform,
    bench_controller_events,
);
criterion_main!(benches);
