//! Auto-scrolling heritage card carousels in the terminal.
//!
//! Each carousel loops seamlessly from right to left and pauses while the
//! mouse rests over it.  Run with `--print-config` to get a starting
//! configuration file.

mod app;
mod config;
mod core;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::ui::{carousel_widget::CarouselWidget, popup::HelpPopup, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Auto-scrolling heritage card carousels")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/heritage-reel/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Print the default configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

const STATUS_HINT: &str = "hover: pause | click: show card | ?: carousels | q: quit";

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    init_logging(cli.log_file.as_deref())?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(fps) = cli.fps {
        config.fps = fps;
        config.validate()?;
    }
    info!(
        fps = config.fps,
        carousels = config.carousels.len(),
        "starting showcase"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(&config, Rect::new(0, 0, size.width, size.height));

    let outcome = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    outcome
}

/// Initialise tracing.  Logs go to `log_file` when given; otherwise to
/// stderr, filtered by `RUST_LOG` (silent by default, so the TUI stays
/// clean).
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── event loop ────────

async fn run(terminal: &mut Terminal<CrosstermBackend<Stderr>>, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / state.fps as f64));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                    AppEvent::FocusLost => handler::handle_focus_lost(state),
                }
            }

            _ = frames.tick() => state.on_frame(),
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();

    for (i, (panel, rect)) in state.panels.iter().zip(&layout.panels).enumerate() {
        let hovered = state
            .hover
            .filter(|h| h.panel == i)
            .and_then(|h| h.slot);
        frame.render_widget(CarouselWidget::new(panel).hovered_slot(hovered), *rect);
    }

    let status_text = state.status_message.as_deref().unwrap_or(STATUS_HINT);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    if state.active_view == ActiveView::Help {
        frame.render_widget(
            HelpPopup {
                panels: &state.panels,
            },
            frame.area(),
        );
    }
}
