//! laneboard - Session board for AI coding agent logs
//!
//! Terminal UI for exploring interaction timelines: one lane per session,
//! density heatmap, brush-based cross-filtering, and deep links into full
//! event detail.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use laneboard_core::{loader, Config, SessionBoard};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

#[derive(Debug, Parser)]
#[command(name = "laneboard", about = "Session board for AI coding agent logs")]
struct Args {
    /// Session root to scan for *.jsonl logs (overrides the config file)
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        laneboard_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("laneboard TUI starting up");

    let root = args.root.unwrap_or_else(|| config.session_root());
    tracing::info!(root = %root.display(), "Loading sessions");

    let outcome = loader::load_sessions(&root)
        .with_context(|| format!("failed to load sessions under {}", root.display()))?;
    let board = SessionBoard::new(outcome, config.board.default_zoom);

    let mut app = App::new(
        board,
        config.board.heatmap_days,
        config.board.slot_width,
        config.board.min_label_gap,
        root.display().to_string(),
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("laneboard TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Let the transient jump highlight decay
        app.tick_flash();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
