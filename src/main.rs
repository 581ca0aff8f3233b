mod audio;
mod config;
mod dsp;
mod kit;
mod types;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::Receiver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::KitConfig;
use ui::{app::App, events, render, terminal::TerminalSession};

/// A virtual drum kit for the terminal
#[derive(Parser, Debug)]
#[command(name = "drumtopia")]
#[command(about = "Play an eight-piece drum kit from the keyboard or mouse", long_about = None)]
struct Args {
    /// Configuration file (YAML); the built-in kit is used when omitted
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// List available audio output devices and exit
    #[arg(short = 'l', long = "list")]
    list_devices: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Install the log subscriber. The TUI owns stdout, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    if args.list_devices {
        println!("Available Audio Output Devices:");
        for (i, device) in audio::stream::list_audio_devices()?.iter().enumerate() {
            println!("  {}: {}", i, device);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => KitConfig::load(path)?,
        None => KitConfig::default(),
    };
    let sounds = config.sound_table()?;

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let (voice_tx, voice_rx) = crossbeam_channel::unbounded();

    let _stream = audio::stream::start_output(
        config.audio.device.as_deref(),
        sounds,
        config.audio.gain,
        event_rx,
        voice_tx,
    )?;

    let mut app = App::new(
        event_tx,
        config.animation.duration(),
        StdRng::from_entropy(),
    );

    info!("DrumTopia ready");
    let mut session = TerminalSession::new()?;
    run_ui_loop(&mut session, &mut app, voice_rx)?;

    Ok(())
}

/// Draw, handle input, and fire animation ends until the user quits
fn run_ui_loop(
    session: &mut TerminalSession,
    app: &mut App,
    voice_rx: Receiver<usize>,
) -> Result<()> {
    loop {
        // Voice counts from audio thread
        while let Ok(count) = voice_rx.try_recv() {
            app.active_voices = count;
        }

        let now = Instant::now();
        app.tick(now);

        session.terminal.draw(|f| {
            app.viewport = f.size();
            render::render(f, app, now);
        })?;

        // Blocks for at most one frame interval
        events::handle_events(app)?;

        if app.should_quit {
            info!("Quit requested");
            break;
        }
    }

    Ok(())
}
