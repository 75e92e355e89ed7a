//! Spy game: a pass-the-terminal party game.
//!
//! One player is secretly the spy; everyone else shares a secret word. Each
//! player opens their own seat to see their role, then the table questions
//! each other until someone is accused or the timer runs out.
//!
//! # Architecture
//!
//! - **Round engine** ([`spy_round`]): pure reducer over dealt rounds.
//! - **Setup**: the form that produces a validated [`RoundConfig`].
//! - **Ticker**: the one-second tick task driving the countdown.
//! - **TUI**: screens and the [`GameController`] state machine.
//!
//! # Example
//!
//! ```no_run
//! use spy_game::{GameConfig, run_tui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("spy_game.toml")?;
//! run_tui(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game_config;
mod setup;
mod ticker;
mod tui;

// Crate-level exports - Configuration
pub use game_config::{ConfigError, GameConfig};

// Crate-level exports - Setup form
pub use setup::{Field, SetupForm};

// Crate-level exports - Tick scheduling
pub use ticker::{Tick, Ticker};

// Crate-level exports - Terminal UI
pub use tui::{
    GameController, RoundScreen, Screen, ScreenTransition, SetupScreen, TICK_PERIOD, center_rect,
    run_tui,
};

// Crate-level exports - Round engine
pub use spy_round::{
    Command, DEFAULT_SPY_MESSAGE, DEFAULT_WORDS, Dealer, DialogView, Effect, MAX_MINUTES,
    MAX_PLAYERS, MIN_MINUTES, MIN_PLAYERS, Phase, Role, Round, RoundConfig, RoundError, Seat,
    SetupError, Transition, Vocabulary, VocabularyError, format_countdown,
};
