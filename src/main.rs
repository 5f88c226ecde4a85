// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use forge::catalog::{Genre, Mood};
use forge::config::{ForgeConfig, LoggingConfig};
use forge::ui::App;
use forge::{Console, GenerationStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("FORGE - AI-Powered Music Generation Console");
    println!();
    println!("Usage: forge [OPTIONS]");
    println!();
    println!("Without options the interactive console is started.");
    println!();
    println!("Options:");
    println!("  --config <FILE>         Load settings from a YAML file");
    println!("  --generate <PROMPT>     Run one generation without the UI and print the track");
    println!("  --genre <NAME>          Genre for --generate (default from config)");
    println!("  --mood <NAME>           Mood for --generate (default from config)");
    println!("  --list-genres           List available genres");
    println!("  --list-moods            List available moods");
    println!("  --help                  Show this help message");
}

/// What the command line asked for
enum Command {
    Interactive,
    Generate(String),
    ListGenres,
    ListMoods,
    Help,
}

struct Options {
    command: Command,
    config: Option<PathBuf>,
    genre: Option<String>,
    mood: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        command: Command::Interactive,
        config: None,
        genre: None,
        mood: None,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--generate" => options.command = Command::Generate(value("--generate")?),
            "--genre" => options.genre = Some(value("--genre")?),
            "--mood" => options.mood = Some(value("--mood")?),
            "--list-genres" => options.command = Command::ListGenres,
            "--list-moods" => options.command = Command::ListMoods,
            "--help" | "-h" => options.command = Command::Help,
            other => bail!("Unknown option: {}", other),
        }
    }

    if (options.genre.is_some() || options.mood.is_some())
        && !matches!(options.command, Command::Generate(_))
    {
        bail!("--genre and --mood are only used with --generate");
    }
    Ok(options)
}

/// Log to a file in interactive mode (stderr would corrupt the screen)
fn setup_file_tracing(logging: &LoggingConfig) -> Result<()> {
    let Some(path) = &logging.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {err}"))?;
    Ok(())
}

fn setup_stderr_tracing(logging: &LoggingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {err}"))?;
    Ok(())
}

/// `RUST_LOG` wins over the configured filter
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter))
}

fn load_config(path: Option<&PathBuf>) -> Result<ForgeConfig> {
    match path {
        Some(path) => ForgeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ForgeConfig::default()),
    }
}

fn run_interactive(config: ForgeConfig) -> Result<()> {
    setup_file_tracing(&config.logging)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;
    // Submits spawn their timers onto this runtime
    let _guard = runtime.enter();

    let mut console = Console::new(config)?;
    info!("interactive console started");

    let ui = &console.config().ui;
    let mut app = App::new(ui.frame_rate, ui.waveform_bars).context("failed to set up terminal")?;
    app.run(&mut console)?;
    Ok(())
}

fn run_headless(
    config: ForgeConfig,
    prompt: String,
    genre: Option<&str>,
    mood: Option<&str>,
) -> Result<()> {
    setup_stderr_tracing(&config.logging)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;

    let mut console = Console::new(config)?;
    console.input_mut().set_prompt(prompt);
    if let Some(genre) = genre {
        console.input_mut().select_genre_by_name(genre)?;
    }
    if let Some(mood) = mood {
        console.input_mut().select_mood_by_name(mood)?;
    }

    runtime.block_on(async {
        if !console.submit().is_started() {
            bail!("nothing to generate: the prompt is empty");
        }
        console.run_until_settled().await;
        Ok(())
    })?;

    match console.status() {
        GenerationStatus::Complete => {
            let song = console
                .latest_song()
                .ok_or_else(|| anyhow!("generation finished without a track"))?;
            println!("{}", song.title());
            println!("  genre:    {}", song.genre());
            println!("  duration: {}", song.duration());
            println!("  id:       {}", song.id());
            Ok(())
        }
        GenerationStatus::Error => {
            let reason = console.controller().last_error().unwrap_or("unknown error");
            bail!("generation failed: {}", reason)
        }
        status => bail!("generation ended in unexpected state {}", status),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            std::process::exit(1);
        }
    };

    match options.command {
        Command::Help => print_usage(),
        Command::ListGenres => {
            for genre in Genre::ALL {
                println!("{}", genre);
            }
        }
        Command::ListMoods => {
            for mood in Mood::ALL {
                println!("{}", mood);
            }
        }
        Command::Generate(prompt) => {
            let config = load_config(options.config.as_ref())?;
            run_headless(
                config,
                prompt,
                options.genre.as_deref(),
                options.mood.as_deref(),
            )?;
        }
        Command::Interactive => {
            let config = load_config(options.config.as_ref())?;
            run_interactive(config)?;
        }
    }

    Ok(())
}
