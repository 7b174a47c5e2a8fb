//! Morse Code Transmitter
//!
//! Main entry point and TUI run loop.

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tracing::{info, warn};

use morse_tone::{SilentBackend, ToneBackend};
use morse_transmitter::config::KeyerConfig;
use morse_transmitter::timer::IntervalTicker;
use morse_transmitter::transmitter::Transmitter;
use morse_transmitter::tui::{input, render, Action, App};

#[derive(Parser)]
#[command(name = "morse-transmitter")]
#[command(about = "Hold to key Morse code: short hold = dot, long hold = dash")]
struct Cli {
    /// Config file path (default: ~/.config/morse-transmitter/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Don't play a sidetone
    #[arg(long)]
    mute: bool,

    /// Sidetone frequency in Hz (overrides config)
    #[arg(long)]
    frequency: Option<f32>,

    /// Audio output device name (overrides config)
    #[arg(long)]
    device: Option<String>,

    /// List audio output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file (default: ~/.cache/morse-transmitter/transmitter.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&cli.log_level, &log_path)?;

    if cli.list_devices {
        list_devices();
        return Ok(());
    }

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(KeyerConfig::default_path);
    info!("Loading config from {:?}", config_path);
    let mut config = KeyerConfig::load(&config_path)?;
    if let Some(frequency) = cli.frequency {
        config.tone.frequency_hz = frequency;
    }
    if let Some(device) = cli.device.clone() {
        config.tone.device = Some(device);
    }
    config.validate()?;

    if cli.write_config {
        config.save(&config_path)?;
        println!("Config written to {}", config_path.display());
        return Ok(());
    }

    let (tone, audio_status) = tone_backend(&config, cli.mute);
    run_tui(config, tone, audio_status).await
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("morse-transmitter")
        .join("transmitter.log")
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[cfg(feature = "audio")]
fn list_devices() {
    let devices = morse_tone::list_output_devices();
    if devices.is_empty() {
        println!("No audio output devices found");
    }
    for name in devices {
        println!("{name}");
    }
}

#[cfg(not(feature = "audio"))]
fn list_devices() {
    println!("Built without audio support");
}

/// Pick the tone backend, falling back to silence when no device can be opened
#[cfg(feature = "audio")]
fn tone_backend(config: &KeyerConfig, mute: bool) -> (Box<dyn ToneBackend>, Option<String>) {
    if mute {
        info!("Sidetone muted");
        return (Box::new(SilentBackend::new()), None);
    }

    let mut backend = morse_tone::CpalBackend::new(config.tone.device.clone());
    match backend.probe() {
        Ok(name) => (Box::new(backend), Some(format!("Audio output: {name}"))),
        Err(e) => {
            warn!("Audio output unavailable, continuing muted: {}", e);
            (
                Box::new(SilentBackend::new()),
                Some(format!("Audio unavailable: {e}")),
            )
        }
    }
}

#[cfg(not(feature = "audio"))]
fn tone_backend(_config: &KeyerConfig, _mute: bool) -> (Box<dyn ToneBackend>, Option<String>) {
    (Box::new(SilentBackend::new()), None)
}

/// Puts the terminal into TUI mode and restores it on drop, including on
/// early return and panic unwinding
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        stdout().execute(EnableFocusChange)?;

        // Key release events are only available with the kitty keyboard protocol
        let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
        if enhanced_keys {
            stdout().execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        } else {
            warn!("Terminal does not report key releases; keyboard hold disabled");
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = stdout().execute(PopKeyboardEnhancementFlags);
        }
        let _ = stdout().execute(DisableFocusChange);
        let _ = stdout().execute(DisableMouseCapture);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run with TUI
async fn run_tui(
    config: KeyerConfig,
    tone: Box<dyn ToneBackend>,
    audio_status: Option<String>,
) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let (ticker, mut tick_rx) = IntervalTicker::channel();
    let transmitter = Transmitter::new(config.settings(), tone, Box::new(ticker));
    let mut app = App::new(transmitter, guard.enhanced_keys);
    app.status_message = audio_status;

    info!(
        "Transmitter ready (tone {} Hz, dash at {} ms)",
        config.tone.frequency_hz, config.timing.dash_threshold_ms
    );

    let mut events = EventStream::new();

    loop {
        guard.terminal.draw(|f| render::render(f, &mut app))?;

        tokio::select! {
            // Terminal events
            event = events.next() => {
                match event {
                    Some(Ok(event)) => {
                        if let Some(action) = input::map_event(&app, &event) {
                            app.apply(action);
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Terminal event error: {}", e);
                        app.apply(Action::Quit);
                    }
                    None => app.apply(Action::Quit),
                }
            }

            // Hold timer
            Some(tick) = tick_rx.recv() => {
                app.transmitter.on_tick(tick);
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Exiting with message: {}", app.transmitter.message());

    // Release the hold resources before the terminal is restored
    drop(app);
    drop(guard);
    Ok(())
}
