//! First-class invariants for a round.
//!
//! Invariants are properties that hold after every transition. They can be
//! tested on their own and are checked as postconditions in debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod countdown_bounded;
pub mod dialog_seat;
pub mod reveal_phase;
pub mod single_spy;

pub use countdown_bounded::CountdownBoundedInvariant;
pub use dialog_seat::DialogOnRevealedSeatInvariant;
pub use reveal_phase::RevealPhaseInvariant;
pub use single_spy::SingleSpyInvariant;

/// Every round invariant as one composable set.
pub type RoundInvariants = (
    SingleSpyInvariant,
    RevealPhaseInvariant,
    DialogOnRevealedSeatInvariant,
    CountdownBoundedInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, Dealer, Round, RoundConfig, Transition};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dealt() -> Round {
        Dealer::default().deal(
            RoundConfig::new(4, Some(2)).unwrap(),
            &mut StdRng::seed_from_u64(21),
        )
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_round() {
        assert!(RoundInvariants::check_all(&dealt()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_round() {
        let mut round = dealt();
        let mut commands = Vec::new();
        for seat in 0..4 {
            commands.push(Command::Reveal(seat));
            commands.push(Command::CloseDialog);
        }
        commands.push(Command::StartTimer);
        commands.extend(std::iter::repeat_n(Command::Tick, 5));

        for command in commands {
            round = match round.apply(command).unwrap() {
                Transition::Continue { round, .. } => round,
                Transition::Reset => panic!("no reset expected"),
            };
            assert!(RoundInvariants::check_all(&round).is_ok(), "after {}", command);
        }
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        let mut round = dealt();
        let spy = round.spy_index;
        round.seats[(spy + 1) % 4] = crate::Seat::new(crate::Role::Spy);
        round.active_dialog = Some(0);

        let violations = RoundInvariants::check_all(&round).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
