//! Spy game round logic.
//!
//! A round deals one secret "spy" among N seats and a shared secret word to
//! everyone else, then tracks private reveals one seat at a time and an
//! optional countdown once every seat has seen its role.
//!
//! The engine is a reducer: [`Round::apply`] maps a [`Command`] to a
//! [`Transition`] carrying the next round and any [`Effect`]s the host must
//! perform (scheduling or cancelling the one-second tick). Nothing here
//! touches a terminal, a clock, or a thread.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use spy_round::{Command, Dealer, RoundConfig, Transition};
//!
//! let config = RoundConfig::new(3, Some(5)).expect("valid config");
//! let mut rng = StdRng::seed_from_u64(7);
//! let round = Dealer::default().deal(config, &mut rng);
//!
//! let Transition::Continue { round, .. } = round.apply(Command::Reveal(0)).unwrap() else {
//!     unreachable!("reveal never resets");
//! };
//! assert!(round.seats()[0].is_revealed());
//! assert!(round.dialog().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod contracts;
mod countdown;
mod dealer;
mod invariants;
mod phases;
mod round;
mod types;
mod vocabulary;

pub use action::{Command, Effect, RoundError, Transition};
pub use config::{MAX_MINUTES, MAX_PLAYERS, MIN_MINUTES, MIN_PLAYERS, RoundConfig, SetupError};
pub use contracts::{Contract, RevealContract, TickContract};
pub use countdown::{Countdown, format_countdown};
pub use dealer::{DEFAULT_SPY_MESSAGE, Dealer};
pub use invariants::{
    CountdownBoundedInvariant, DialogOnRevealedSeatInvariant, Invariant, InvariantSet,
    InvariantViolation, RevealPhaseInvariant, RoundInvariants, SingleSpyInvariant,
};
pub use phases::Phase;
pub use round::{DialogView, Round};
pub use types::{Role, Seat};
pub use vocabulary::{DEFAULT_WORDS, Vocabulary, VocabularyError};
