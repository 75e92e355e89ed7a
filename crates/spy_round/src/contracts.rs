//! Pre- and postconditions for round transitions.
//!
//! Preconditions are checked on every call. Postconditions are checked in
//! debug builds only.

use tracing::{instrument, warn};

use super::action::RoundError;
use super::invariants::{InvariantSet, RoundInvariants};
use super::phases::Phase;
use super::round::Round;

/// Pre- and postconditions for one kind of transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), RoundError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), RoundError>;
}

fn check_invariants(round: &Round) -> Result<(), RoundError> {
    RoundInvariants::check_all(round).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        RoundError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for revealing a seat.
///
/// Precondition: the seat exists.
///
/// Postconditions:
/// - every round invariant holds
/// - reveals are monotonic: no seat goes back to hidden
/// - exactly one seat flipped, and it is the one whose dialog is open
pub struct RevealContract;

impl Contract<Round, usize> for RevealContract {
    #[instrument(skip(round))]
    fn pre(round: &Round, seat: &usize) -> Result<(), RoundError> {
        if *seat >= round.seats.len() {
            warn!(seat, seats = round.seats.len(), "Reveal of unknown seat");
            return Err(RoundError::SeatOutOfRange {
                seat: *seat,
                seats: round.seats.len(),
            });
        }
        Ok(())
    }

    fn post(before: &Round, after: &Round) -> Result<(), RoundError> {
        check_invariants(after)?;

        if before.seats.len() != after.seats.len() {
            return Err(RoundError::InvariantViolation(
                "Seat count changed during reveal".to_string(),
            ));
        }

        let mut flipped = Vec::new();
        for (i, (b, a)) in before.seats.iter().zip(&after.seats).enumerate() {
            if b.is_revealed() && !a.is_revealed() {
                return Err(RoundError::InvariantViolation(format!(
                    "Seat {} was hidden again",
                    i
                )));
            }
            if !b.is_revealed() && a.is_revealed() {
                flipped.push(i);
            }
        }

        match flipped.as_slice() {
            [seat] if after.active_dialog == Some(*seat) => Ok(()),
            _ => Err(RoundError::InvariantViolation(format!(
                "Expected one newly revealed seat with an open dialog, got {:?}",
                flipped
            ))),
        }
    }
}

/// Contract for a one-second tick.
///
/// Precondition: while counting down, the round has a running countdown.
///
/// Postconditions:
/// - every round invariant holds
/// - a running countdown lost exactly one second
pub struct TickContract;

impl Contract<Round, ()> for TickContract {
    #[instrument(skip(round, _tick), fields(phase = %round.phase))]
    fn pre(round: &Round, _tick: &()) -> Result<(), RoundError> {
        if round.phase == Phase::Countdown && !round.countdown.is_some_and(|c| c.is_running()) {
            warn!("Tick while counting down without a running countdown");
            return Err(RoundError::InvariantViolation(
                "Countdown phase has no running countdown".to_string(),
            ));
        }
        Ok(())
    }

    fn post(before: &Round, after: &Round) -> Result<(), RoundError> {
        check_invariants(after)?;

        match (before.countdown, after.countdown) {
            (Some(b), Some(a)) if b.is_running() && a.remaining() + 1 != b.remaining() => {
                Err(RoundError::InvariantViolation(format!(
                    "Tick moved countdown from {} to {}",
                    b.remaining(),
                    a.remaining()
                )))
            }
            _ => Ok(()),
        }
    }
}
