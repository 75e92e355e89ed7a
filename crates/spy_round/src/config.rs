//! Round configuration produced by the setup form.

use derive_more::Display;
use serde::Serialize;
use tracing::{instrument, warn};

/// Fewest seats a round can have.
pub const MIN_PLAYERS: usize = 2;
/// Most seats a round can have.
pub const MAX_PLAYERS: usize = 20;
/// Shortest timed round, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest timed round, in minutes.
pub const MAX_MINUTES: u32 = 180;

/// Validated, immutable configuration for one round.
///
/// Only constructible through [`RoundConfig::new`], so every value in
/// circulation already satisfies the player and duration bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoundConfig {
    players: usize,
    minutes: Option<u32>,
}

impl RoundConfig {
    /// Validates and creates a round configuration.
    ///
    /// `minutes` of `None` means an untimed round.
    #[instrument]
    pub fn new(players: usize, minutes: Option<u32>) -> Result<Self, SetupError> {
        if players < MIN_PLAYERS {
            warn!(players, "Refusing round with too few players");
            return Err(SetupError::TooFewPlayers(players));
        }
        if players > MAX_PLAYERS {
            warn!(players, "Refusing round with too many players");
            return Err(SetupError::TooManyPlayers(players));
        }
        if let Some(m) = minutes {
            if m < MIN_MINUTES {
                warn!(minutes = m, "Refusing round with zero duration");
                return Err(SetupError::DurationTooShort);
            }
            if m > MAX_MINUTES {
                warn!(minutes = m, "Refusing round with excessive duration");
                return Err(SetupError::DurationTooLong(m));
            }
        }
        Ok(Self { players, minutes })
    }

    /// Number of seats.
    pub fn players(&self) -> usize {
        self.players
    }

    /// Round length in minutes, if timed.
    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    /// Round length in seconds, if timed.
    pub fn duration_seconds(&self) -> Option<u32> {
        self.minutes.map(|m| m * 60)
    }
}

/// Reason the setup form refused to produce a [`RoundConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SetupError {
    /// A field did not hold a whole number.
    #[display("{} must be a whole number", _0)]
    NotANumber(&'static str),

    /// Player count below [`MIN_PLAYERS`].
    #[display("At least {} players are needed (got {})", MIN_PLAYERS, _0)]
    TooFewPlayers(usize),

    /// Player count above [`MAX_PLAYERS`].
    #[display("At most {} players are supported (got {})", MAX_PLAYERS, _0)]
    TooManyPlayers(usize),

    /// Duration below [`MIN_MINUTES`].
    #[display("Duration must be at least {} minute", MIN_MINUTES)]
    DurationTooShort,

    /// Duration above [`MAX_MINUTES`].
    #[display("Duration must be at most {} minutes (got {})", MAX_MINUTES, _0)]
    DurationTooLong(u32),
}

impl std::error::Error for SetupError {}
