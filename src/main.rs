//! Test Case Generator TUI - terminal front end for the test case generator
//!
//! A Ratatui-based client that turns user stories into test cases through the
//! generator's HTTP API, with export, copy and example loading.

mod api;
mod app;
mod clipboard;
mod clock;
mod config;
mod error;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "testgen-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Flushes buffered log lines when dropped
    let log_guard = init_logging();

    let config = TuiConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        TuiConfig::default()
    });
    info!(api_url = %config.api_url(), "starting");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the UI.
/// Falls back to stderr when no log file can be opened.
fn init_logging() -> Option<WorkerGuard> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| "testgen_tui=info".into());

    match TuiConfig::log_dir().and_then(|dir| log_file_appender(&dir)) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter())
                .with(fmt::layer().with_writer(io::stderr))
                .init();
            None
        }
    }
}

/// Single appending log file in `dir`, never rotated
fn log_file_appender(dir: &Path) -> Option<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .ok()
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        let now = app.now();
        terminal.draw(|frame| ui::draw(frame, &app.state, now))?;

        // Faster polling while the spinner or a toast is animating (16ms = ~60fps)
        let poll_duration = if app.is_animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                // Windows also reports releases
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        app.drain_events();

        if app.should_quit() {
            info!("quitting");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_log_file_appender_creates_dir_and_appends() {
        let dir = std::env::temp_dir()
            .join(format!("testgen-tui-log-{}", uuid::Uuid::new_v4()))
            .join("logs");

        let mut appender = log_file_appender(&dir).unwrap();
        appender.write_all(b"first\n").unwrap();
        appender.flush().unwrap();
        drop(appender);

        let mut appender = log_file_appender(&dir).unwrap();
        appender.write_all(b"second\n").unwrap();
        appender.flush().unwrap();

        let written = std::fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
        assert_eq!(written, "first\nsecond\n");
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
