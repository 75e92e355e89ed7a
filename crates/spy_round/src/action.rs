//! Commands, effects, and transitions for the round reducer.
//!
//! Commands are the only way a round changes. They represent user intent
//! (or the clock) and are validated by the round before being applied.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::round::Round;

/// Something that can happen to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Command {
    /// A seat asks to see its role.
    #[display("reveal seat {}", _0)]
    Reveal(usize),
    /// The open reveal dialog is dismissed.
    #[display("close dialog")]
    CloseDialog,
    /// Start the countdown.
    #[display("start timer")]
    StartTimer,
    /// One second elapsed.
    #[display("tick")]
    Tick,
    /// Abandon the round and return to setup.
    #[display("reset")]
    Reset,
}

/// Side effect the host must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Begin delivering [`Command::Tick`] once per second.
    StartTicker,
    /// Stop delivering ticks.
    StopTicker,
    /// The last dialog closed; present the instructions.
    ShowInstructions,
}

/// Result of applying a command.
#[derive(Debug, Clone)]
pub enum Transition {
    /// The round goes on, possibly unchanged.
    Continue {
        /// The round after the command.
        round: Round,
        /// Effects to perform, in order.
        effects: Vec<Effect>,
    },
    /// The round is over. Drop it, cancel any ticks, and go back to setup.
    Reset,
}

impl Transition {
    /// A transition that leaves the round as it was.
    pub(crate) fn unchanged(round: &Round) -> Self {
        Self::Continue {
            round: round.clone(),
            effects: Vec::new(),
        }
    }

    /// Effects requested by this transition.
    ///
    /// A reset implies [`Effect::StopTicker`].
    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Continue { effects, .. } => effects,
            Self::Reset => &[Effect::StopTicker],
        }
    }

    /// Returns the next round, or `None` after a reset.
    pub fn into_round(self) -> Option<Round> {
        match self {
            Self::Continue { round, .. } => Some(round),
            Self::Reset => None,
        }
    }
}

/// Error applying a command.
///
/// Redundant commands (revealing twice, starting a running timer) are not
/// errors; they come back as unchanged transitions.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RoundError {
    /// The seat index does not exist in this round.
    #[display("Seat {} is out of range (round has {} seats)", seat, seats)]
    SeatOutOfRange {
        /// Requested seat.
        seat: usize,
        /// Number of seats in the round.
        seats: usize,
    },

    /// A postcondition failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RoundError {}
