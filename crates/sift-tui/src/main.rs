//! Sift TUI - terminal front-end for the search palette.
//!
//! Runs a palette session in-process and renders its updates with ratatui.
//! Also offers one-shot `query` and `history` subcommands.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use sift_core::config::{Config, Directories};
use sift_core::storage::JsonFileStore;
use sift_core::{HistoryStore, PaletteEvent, QueryController, run_session};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use std::io;

mod app;
mod cli;
mod colors;
mod render;

use app::{App, builtin_commands};
use cli::{Cli, Commands};
use render::{render_help_overlay, render_results_ui};

fn setup_logging(debug_flag: bool) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("sift-tui-{timestamp}.log");
    let log_path = std::path::Path::new("/tmp").join(&log_filename);

    let symlink_path = std::path::Path::new("/tmp/sift-tui.log");
    let _ = std::fs::remove_file(symlink_path);
    let _ = std::os::unix::fs::symlink(&log_path, symlink_path);

    let file_appender = tracing_appender::rolling::never("/tmp", &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

/// Resolve directories and config, applying command-line overrides
fn load_settings(cli: &Cli) -> Result<(Directories, Config)> {
    let dirs = Directories::new()?;
    dirs.ensure_exists()?;

    let config_path = cli.config.as_ref().unwrap_or(&dirs.config_file);
    let mut config = Config::load(config_path)?;

    if let Some(base_url) = &cli.base_url {
        config.remote.base_url.clone_from(base_url);
        config.remote.enabled = true;
    }

    Ok((dirs, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let (dirs, config) = load_settings(&cli)?;
    tracing::debug!(
        "Config: debounce={}ms remote={} ({})",
        config.search.debounce_ms,
        config.remote.enabled,
        config.remote.search_url()
    );

    match cli.command {
        Some(Commands::Query { query, json }) => search_query(&dirs, &config, &query, json).await?,
        Some(Commands::History { clear }) => show_history(&dirs, &config, clear),
        Some(Commands::Tui) | None => run_tui(&dirs, &config).await?,
    }

    Ok(())
}

fn forward(events: &UnboundedSender<PaletteEvent>, event: PaletteEvent) {
    if let Err(e) = events.send(event) {
        tracing::error!("Palette session is gone: {}", e);
    }
}

async fn run_tui(dirs: &Directories, config: &Config) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (controller, mut updates) =
        QueryController::open(dirs, config, builtin_commands(&action_tx))?;
    drop(action_tx);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(controller, events_rx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let mut event_stream = EventStream::new();
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| ui(f, &mut app))?;
            needs_render = false;
        }

        tokio::select! {
            Some(update) = updates.recv() => {
                if let Some(event) = app.handle_update(update) {
                    forward(&events_tx, event);
                }
                needs_render = true;
            }

            Some(action) = action_rx.recv() => {
                tracing::debug!("Built-in action: {:?}", action);
                if let Some(event) = app.handle_action(action) {
                    forward(&events_tx, event);
                }
                needs_render = true;
            }

            Some(event_result) = event_stream.next() => {
                let event = match event_result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::error!("Event stream error: {}", e);
                        continue;
                    }
                };

                let palette_event = match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    Event::Mouse(mouse) => app.handle_mouse(mouse),
                    Event::Resize(..) => None,
                    _ => continue,
                };

                if let Some(palette_event) = palette_event {
                    forward(&events_tx, palette_event);
                }
                needs_render = true;
            }

            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    drop(events_tx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = session.await {
        tracing::warn!("Palette session ended abnormally: {}", e);
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    render_results_ui(f, app);
    if app.show_help {
        render_help_overlay(f);
    }
}

async fn search_query(dirs: &Directories, config: &Config, query: &str, json: bool) -> Result<()> {
    let (action_tx, _action_rx) = mpsc::unbounded_channel();
    let (mut controller, _updates) =
        QueryController::open(dirs, config, builtin_commands(&action_tx))?;

    let results = controller.search_now(query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("Searching: {query}");
    println!();
    println!("Results: {} items", results.len());
    for (i, r) in results.iter().enumerate() {
        let excerpt = r.excerpt();
        if excerpt.is_empty() {
            println!("  {}. [{}] {}", i + 1, r.kind().label(), r.title());
        } else {
            println!("  {}. [{}] {} - {}", i + 1, r.kind().label(), r.title(), excerpt);
        }
    }

    Ok(())
}

fn show_history(dirs: &Directories, config: &Config, clear: bool) {
    let mut history = HistoryStore::load(
        Box::new(JsonFileStore::new(&dirs.state_file)),
        config.search.history_limit,
    );

    if clear {
        history.clear();
        println!("Search history cleared.");
        return;
    }

    if history.is_empty() {
        println!("No search history.");
        return;
    }

    println!();
    println!("Search History");
    println!("==============");
    println!();
    for (i, query) in history.entries().iter().enumerate() {
        println!("  {}. {query}", i + 1);
    }
    println!();
}
