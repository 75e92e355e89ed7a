//! Secret word vocabulary.

use derive_more::Display;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

/// Built-in word list.
pub const DEFAULT_WORDS: &[&str] = &[
    "Apple", "Boat", "Car", "Date", "Exit", "Fire", "Garden", "Happy", "Ice", "Jump", "Kite",
    "Lemon", "Moon", "Night", "Orange", "Pencil", "Queen", "Rain", "Sun", "Table", "Umbrella",
    "Violin", "Water", "Xylophone", "Yellow", "Zebra", "Zoom", "Yacht", "Xenon", "Wagon",
    "Violet", "Tulip", "Sushi", "Star", "Snow", "Soccer", "Rocket", "Rainbow", "Puzzle",
    "Pirate", "Owl", "Ninja", "Mushroom", "Mango", "Lighthouse", "Kangaroo", "Jungle", "Iceberg",
    "Horse", "Guitar", "Frog", "Flower", "Falcon", "Eagle", "Dragon", "Dolphin", "Cupcake",
    "Cactus", "Butterfly", "Bicycle", "Bee", "Bear", "Astronaut", "Ant",
];

/// Non-empty list of distinct words a round's secret is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from arbitrary words.
    ///
    /// Words are trimmed; blanks and case-insensitive duplicates are dropped,
    /// keeping the first spelling seen.
    #[instrument(skip(words))]
    pub fn from_words<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if kept.iter().any(|k| k.eq_ignore_ascii_case(word)) {
                debug!(word, "Dropping duplicate word");
                continue;
            }
            kept.push(word.to_string());
        }

        if kept.is_empty() {
            return Err(VocabularyError::Empty);
        }

        debug!(count = kept.len(), "Vocabulary built");
        Ok(Self { words: kept })
    }

    /// Returns the words in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draws a word uniformly at random.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Vocabulary construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VocabularyError {
    /// No usable words were supplied.
    #[display("Word list must contain at least one non-blank word")]
    Empty,
}

impl std::error::Error for VocabularyError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_words_are_distinct() {
        let vocab = Vocabulary::default();
        let rebuilt = Vocabulary::from_words(DEFAULT_WORDS).unwrap();
        assert_eq!(vocab, rebuilt);
        assert_eq!(vocab.len(), DEFAULT_WORDS.len());
        assert!(!vocab.is_empty());
    }

    #[test]
    fn test_blank_and_duplicate_words_dropped() {
        let vocab = Vocabulary::from_words(["Owl", "  ", "owl", " Frog "]).unwrap();
        assert_eq!(vocab.words(), &["Owl".to_string(), "Frog".to_string()]);
    }

    #[test]
    fn test_empty_list_rejected() {
        let words: [&str; 0] = [];
        assert_eq!(Vocabulary::from_words(words), Err(VocabularyError::Empty));
        assert_eq!(Vocabulary::from_words(["", " "]), Err(VocabularyError::Empty));
    }

    #[test]
    fn test_draw_comes_from_list() {
        let vocab = Vocabulary::from_words(["Moon", "Sun"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let word = vocab.draw(&mut rng);
            assert!(word == "Moon" || word == "Sun");
        }
    }
}
