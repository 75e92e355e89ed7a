//! Terminal UI for the spy game.

mod controller;
mod screen;
mod screens;
mod ui;

pub use controller::{GameController, TICK_PERIOD};
pub use screen::{Screen, ScreenTransition};
pub use screens::{RoundScreen, SetupScreen};
pub use ui::center_rect;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info, instrument};

use crate::GameConfig;

/// Runs the game in the current terminal until the user quits.
///
/// The terminal is restored even when the event loop fails.
#[instrument(skip(config))]
pub async fn run_tui(config: GameConfig) -> Result<()> {
    let mut controller = GameController::new(config)?;

    info!("Starting spy game TUI");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}
