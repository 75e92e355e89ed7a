//! Screen trait and transition type for the game's screen state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use spy_round::{Effect, RoundConfig};

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`GameController`](super::GameController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Setup accepted; deal a round with this configuration.
    StartRound(RoundConfig),
    /// Stay, but carry out these round effects (ticker control).
    Effects(Vec<Effect>),
    /// Round abandoned; return to the setup form.
    BackToSetup,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;
}
