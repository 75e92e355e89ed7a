//! Dialog invariant: an open dialog belongs to a revealed seat.

use super::super::phases::Phase;
use super::super::round::Round;
use super::Invariant;

/// Invariant: the active dialog, if any, is for an existing, revealed seat
/// during the reveal phase.
pub struct DialogOnRevealedSeatInvariant;

impl Invariant<Round> for DialogOnRevealedSeatInvariant {
    fn holds(round: &Round) -> bool {
        match round.active_dialog {
            None => true,
            Some(seat) => {
                round.phase == Phase::Revealing
                    && round.seats.get(seat).is_some_and(|s| s.is_revealed())
            }
        }
    }

    fn description() -> &'static str {
        "Open dialog belongs to a revealed seat"
    }
}
