// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::missing_panics_doc)] // Internal functions don't need # Panics docs
#![allow(clippy::must_use_candidate)] // Not all getters need #[must_use]
#![allow(clippy::module_name_repetitions)] // e.g., DialogConfig in dialog module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around TOML, JSON, etc.
#![allow(clippy::cast_possible_truncation)] // We're careful with our casts
#![allow(clippy::needless_pass_by_value)] // Senders by value are fine for closures
#![allow(clippy::new_without_default)] // Explicit constructors read better at call sites

//! modal-relay - a declarative, shared dialog service for terminal apps
//!
//! Any code holding a `DialogHandle` can ask for a modal dialog (title,
//! description, labeled text inputs, optional confirm action) without owning
//! any rendering state. A small notes TUI hosts the service and acts as the
//! set of producers.
//!
//! Usage:
//!   modal-relay                      # Start the TUI
//!   modal-relay --merge-policy merge # Omitted dialog fields inherit the previous dialog
//!   modal-relay config               # Print an example config file

mod action;
mod app;
mod cli;
mod config;
mod dialog;
mod errors;
mod event;
mod state;
mod tui;
mod ui;

use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::Result;
use config::AppConfig;
use state::AppState;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the log directory path
fn get_log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("/tmp/modal-relay/logs"),
        |dirs| dirs.cache_dir().join("modal-relay").join("logs"),
    )
}

/// Handle the `config` subcommand
fn handle_config_command(path: PathBuf, write: bool) -> Result<()> {
    if !write {
        print!("{}", AppConfig::example());
        return Ok(());
    }

    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    AppConfig::default().save_to_path(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    match cli.command {
        Some(Commands::Config { write }) => {
            return handle_config_command(config_path, write);
        }
        Some(Commands::Completions { shell }) => {
            cli::print_completions(shell);
            return Ok(());
        }
        None => {
            // TUI mode: continue with full setup
        }
    }

    color_eyre::install()?;

    // File logging only: stderr would paint over the alternate screen
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "modal-relay.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let log_filter = format!("modal_relay={}", cli.log_level);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    tracing::info!("Starting modal-relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {:?}", log_dir);

    let mut config = AppConfig::load_from_path(&config_path);
    if let Some(policy) = cli.merge_policy {
        tracing::debug!(?policy, "Merge policy overridden from command line");
        config.dialog.merge_policy = policy;
    }
    tracing::info!(
        merge_policy = ?config.dialog.merge_policy,
        default_title = %config.dialog.default_title,
        "Loaded config"
    );

    let (event_tx, event_rx) = mpsc::channel(100);

    run_tui(event_tx, event_rx, cli.tick_rate, cli.frame_rate, config).await
}

async fn run_tui(
    event_tx: mpsc::Sender<event::Event>,
    mut event_rx: mpsc::Receiver<event::Event>,
    tick_rate: f64,
    frame_rate: f64,
    config: AppConfig,
) -> Result<()> {
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    let tick_duration = Duration::from_secs_f64(1.0 / tick_rate.max(0.1));
    let frame_duration = Duration::from_secs_f64(1.0 / frame_rate.max(1.0));

    tracing::info!(
        "TUI starting: {:.1} FPS, {:.1} ticks/sec",
        frame_rate,
        tick_rate
    );

    let mut terminal = tui::init()?;

    // RAII guard ensures terminal is restored on panic or early return
    let _guard = tui::TerminalGuard;

    // The app owns the one dialog controller for the rest of the run
    let mut app = App::new(AppState::with_samples(), config.dialog);

    let cancel = CancellationToken::new();

    let input_tx = event_tx;
    let input_cancel = cancel.clone();
    let input_handle = tokio::spawn(async move {
        event::input::listen(input_tx, input_cancel).await;
    });

    let mut last_frame = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // Frame rate limiting with dirty flag check
        let now = Instant::now();
        if app.needs_render && now.duration_since(last_frame) >= frame_duration {
            terminal.draw(|f| ui::render(f, &app))?;
            app.rendered();
            last_frame = now;
        }

        // Wake for the pending frame if one is owed, otherwise for the next tick
        let wait = if app.needs_render {
            frame_duration.saturating_sub(last_frame.elapsed())
        } else {
            tick_duration.saturating_sub(last_tick.elapsed())
        };

        tokio::select! {
            Some(event) = event_rx.recv() => {
                app.handle_event(event);
            }
            () = tokio::time::sleep(wait) => {
                if last_tick.elapsed() >= tick_duration {
                    app.tick();
                    last_tick = Instant::now();
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::debug!("Shutting down input listener");
    cancel.cancel();
    input_handle.abort();

    tui::restore()?;
    terminal.show_cursor()?;

    Ok(())
}
