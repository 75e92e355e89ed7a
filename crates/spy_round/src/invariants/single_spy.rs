//! Single spy invariant: exactly one seat is the spy.

use super::super::round::Round;
use super::Invariant;

/// Invariant: exactly one seat is the spy, and it sits at `spy_index`.
pub struct SingleSpyInvariant;

impl Invariant<Round> for SingleSpyInvariant {
    fn holds(round: &Round) -> bool {
        let spies = round.seats.iter().filter(|s| s.is_spy()).count();
        spies == 1 && round.seats.get(round.spy_index).is_some_and(|s| s.is_spy())
    }

    fn description() -> &'static str {
        "Exactly one seat is the spy"
    }
}
