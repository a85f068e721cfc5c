//! `Taskpad` — single-screen terminal task manager.
//!
//! Launches the TUI, hydrates the task list from the data directory, and
//! saves the whole list after every committed change. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/taskpad/config.toml`).
//!
//! ```bash
//! cargo run --bin taskpad
//!
//! # Keep the list somewhere specific
//! cargo run --bin taskpad -- --data-dir ~/notes/taskpad
//!
//! # Or via environment variables
//! TASKPAD_DATA_DIR=~/notes/taskpad cargo run
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskpad::app::{App, AppCommand};
use taskpad::config::{AppConfig, CliArgs};
use taskpad::ui;
use taskpad_core::{FileKv, StoreWarning, Task, TaskStore};

/// Storage-side event delivered to the UI loop.
enum StoreEvent {
    /// The startup load resolved; replace the collection wholesale.
    Hydrated(Vec<Task>),
    /// A storage failure was absorbed; surface it without blocking.
    Warning(StoreWarning),
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(data_dir = %config.data_dir.display(), "taskpad starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskpad exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskpad.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
) -> io::Result<()> {
    let mut app = App::new().with_max_task_text_len(config.max_task_text_len);

    let (store, mut warnings) =
        TaskStore::with_warnings(FileKv::new(&config.data_dir), 16);
    let store = Arc::new(store);
    let (evt_tx, mut evt_rx) = mpsc::channel(16);

    // Startup hydration: one load, applied when it resolves. Until then
    // the list renders in its explicit "loading" state.
    let loader = Arc::clone(&store);
    let hydrate_tx = evt_tx.clone();
    tokio::spawn(async move {
        let tasks = loader.load().await;
        let _ = hydrate_tx.send(StoreEvent::Hydrated(tasks)).await;
    });

    // Forward absorbed storage failures as non-blocking notices.
    tokio::spawn(async move {
        while let Some(warning) = warnings.recv().await {
            if evt_tx.send(StoreEvent::Warning(warning)).await.is_err() {
                break;
            }
        }
    });

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending store events (non-blocking).
        drain_store_events(&mut app, &mut evt_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(Persist) when a committed
            // mutation happened (add, toggle, delete, commit-edit).
            if app.handle_key_event(key) == Some(AppCommand::Persist) {
                // Fire-and-forget full save of a snapshot; last writer
                // wins on the single key, no retry.
                let snapshot = app.list.tasks().to_vec();
                let saver = Arc::clone(&store);
                tokio::spawn(async move { saver.save(&snapshot).await });
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Drain all pending `StoreEvent`s from the receiver and apply them.
fn drain_store_events(app: &mut App, rx: &mut mpsc::Receiver<StoreEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            StoreEvent::Hydrated(tasks) => app.apply_hydration(tasks),
            StoreEvent::Warning(StoreWarning::LoadFailed { reason }) => {
                app.set_notice(format!("Could not load saved tasks ({reason})"));
            }
            StoreEvent::Warning(StoreWarning::SaveFailed { .. }) => {
                app.set_notice("Change not saved, it may not survive a restart".to_string());
            }
        }
    }
}
