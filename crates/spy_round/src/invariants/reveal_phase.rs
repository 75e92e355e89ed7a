//! Reveal/phase invariant: the round only leaves `Revealing` once every seat
//! has revealed and the last dialog is closed.

use super::super::round::Round;
use super::Invariant;

/// Invariant: past the reveal phase, every seat is revealed and no dialog is open.
pub struct RevealPhaseInvariant;

impl Invariant<Round> for RevealPhaseInvariant {
    fn holds(round: &Round) -> bool {
        !round.phase.all_revealed() || (round.all_revealed() && round.active_dialog.is_none())
    }

    fn description() -> &'static str {
        "Round leaves the reveal phase only after every seat revealed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dealer, Phase, RoundConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_premature_instructions_violates() {
        let config = RoundConfig::new(3, None).unwrap();
        let mut round = Dealer::default().deal(config, &mut StdRng::seed_from_u64(2));
        assert!(RevealPhaseInvariant::holds(&round));
        round.phase = Phase::Instructions;
        assert!(!RevealPhaseInvariant::holds(&round));
    }
}
