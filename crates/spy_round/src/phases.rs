//! Round phases.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Where a round is in its lifecycle.
///
/// Whether a reveal dialog is open is tracked separately and only matters
/// while [`Phase::Revealing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Phase {
    /// Seats are still viewing their roles.
    Revealing,
    /// Every seat has revealed; waiting for the timer to be started.
    Instructions,
    /// Countdown is running.
    Countdown,
    /// Countdown reached zero.
    #[display("Time up")]
    TimeUp,
}

impl Phase {
    /// Returns true once every seat has revealed.
    pub fn all_revealed(self) -> bool {
        !matches!(self, Phase::Revealing)
    }
}
