//! Round initialization.

use derive_getters::Getters;
use rand::Rng;
use tracing::{info, instrument};

use super::config::RoundConfig;
use super::countdown::Countdown;
use super::phases::Phase;
use super::round::Round;
use super::types::{Role, Seat};
use super::vocabulary::Vocabulary;

/// Dialog text shown to the spy.
pub const DEFAULT_SPY_MESSAGE: &str = "You are the spy!";

/// Deals new rounds from a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Dealer {
    /// Words secrets are drawn from.
    vocabulary: Vocabulary,
    /// Text shown to the spy on reveal.
    spy_message: String,
}

impl Dealer {
    /// Creates a dealer with a custom vocabulary and spy message.
    pub fn new(vocabulary: Vocabulary, spy_message: impl Into<String>) -> Self {
        Self {
            vocabulary,
            spy_message: spy_message.into(),
        }
    }

    /// Starts a fresh round.
    ///
    /// Draws the spy seat uniformly from `0..players` and the secret word
    /// uniformly from the vocabulary. Every seat starts unrevealed, no dialog
    /// is open, and the countdown (if any) is stopped at its full duration.
    #[instrument(skip(self, rng))]
    pub fn deal<R: Rng + ?Sized>(&self, config: RoundConfig, rng: &mut R) -> Round {
        let spy_index = rng.gen_range(0..config.players());
        let secret_word = self.vocabulary.draw(rng).to_string();

        let seats = (0..config.players())
            .map(|i| {
                if i == spy_index {
                    Seat::new(Role::Spy)
                } else {
                    Seat::new(Role::Civilian)
                }
            })
            .collect();

        info!(players = config.players(), timed = config.minutes().is_some(), "Round dealt");

        Round {
            config,
            seats,
            spy_index,
            secret_word,
            spy_message: self.spy_message.clone(),
            active_dialog: None,
            phase: Phase::Revealing,
            countdown: config.duration_seconds().map(Countdown::new),
        }
    }

    /// Starts a fresh round using the thread-local RNG.
    pub fn deal_random(&self, config: RoundConfig) -> Round {
        self.deal(config, &mut rand::thread_rng())
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new(Vocabulary::default(), DEFAULT_SPY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spy_index_varies_with_seed() {
        let dealer = Dealer::default();
        let config = RoundConfig::new(6, None).unwrap();
        let spies: std::collections::HashSet<usize> = (0..64)
            .map(|seed| dealer.deal(config, &mut StdRng::seed_from_u64(seed)).spy_index())
            .collect();
        assert!(spies.len() > 1, "spy should not always land on the same seat");
        assert!(spies.iter().all(|&i| i < 6));
    }

    #[test]
    fn test_custom_spy_message() {
        let vocab = Vocabulary::from_words(["Moon"]).unwrap();
        let dealer = Dealer::new(vocab, "Bluff!");
        let round = dealer.deal(RoundConfig::new(2, None).unwrap(), &mut StdRng::seed_from_u64(1));
        assert_eq!(round.secret_word(), "Moon");
        assert_eq!(round.reveal_text(round.spy_index()), Some("Bluff!"));
        assert_eq!(dealer.spy_message(), "Bluff!");
        assert_eq!(dealer.vocabulary().len(), 1);
    }

    #[test]
    fn test_timed_round_starts_stopped() {
        let dealer = Dealer::default();
        let round = dealer.deal(RoundConfig::new(3, Some(2)).unwrap(), &mut StdRng::seed_from_u64(9));
        let countdown = round.countdown().expect("timed round");
        assert_eq!(countdown.remaining(), 120);
        assert!(!countdown.is_running());
    }
}
