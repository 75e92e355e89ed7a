//! Countdown invariant: the timer agrees with the phase and never exceeds
//! its duration.

use super::super::phases::Phase;
use super::super::round::Round;
use super::Invariant;

/// Invariant: countdown state matches the phase.
///
/// - remaining never exceeds the total
/// - the countdown runs only in [`Phase::Countdown`]
/// - [`Phase::Countdown`] and [`Phase::TimeUp`] need a countdown
/// - [`Phase::TimeUp`] means zero seconds left
pub struct CountdownBoundedInvariant;

impl Invariant<Round> for CountdownBoundedInvariant {
    fn holds(round: &Round) -> bool {
        match (round.phase, round.countdown) {
            (Phase::Countdown, Some(c)) => c.running && c.remaining <= c.total,
            (Phase::TimeUp, Some(c)) => !c.running && c.remaining == 0,
            (Phase::Countdown | Phase::TimeUp, None) => false,
            (_, Some(c)) => !c.running && c.remaining == c.total,
            (_, None) => true,
        }
    }

    fn description() -> &'static str {
        "Countdown runs only while counting and stays within its duration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dealer, RoundConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_running_outside_countdown_violates() {
        let config = RoundConfig::new(2, Some(1)).unwrap();
        let mut round = Dealer::default().deal(config, &mut StdRng::seed_from_u64(8));
        assert!(CountdownBoundedInvariant::holds(&round));
        if let Some(c) = round.countdown.as_mut() {
            c.running = true;
        }
        assert!(!CountdownBoundedInvariant::holds(&round));
    }

    #[test]
    fn test_countdown_phase_without_timer_violates() {
        let config = RoundConfig::new(2, None).unwrap();
        let mut round = Dealer::default().deal(config, &mut StdRng::seed_from_u64(8));
        round.phase = Phase::Countdown;
        assert!(!CountdownBoundedInvariant::holds(&round));
    }
}
