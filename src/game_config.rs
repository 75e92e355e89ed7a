//! Game configuration loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use spy_round::{Dealer, RoundConfig, Vocabulary};
use tracing::{debug, info, instrument};

/// User-tunable settings for the spy game.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player count pre-filled in the setup form.
    #[serde(default = "default_players")]
    default_players: usize,

    /// Round length in minutes pre-filled in the setup form. `None` leaves
    /// the field blank (untimed).
    #[serde(default = "default_minutes")]
    default_minutes: Option<u32>,

    /// Text the spy sees instead of the word.
    #[serde(default = "default_spy_message")]
    spy_message: String,

    /// Replacement word list. Uses the built-in list when absent.
    #[serde(default)]
    words: Option<Vec<String>>,

    /// Where logs are written while the TUI owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_players() -> usize {
    4
}

#[instrument]
fn default_minutes() -> Option<u32> {
    Some(5)
}

#[instrument]
fn default_spy_message() -> String {
    spy_round::DEFAULT_SPY_MESSAGE.to_string()
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("spy_game.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_players: default_players(),
            default_minutes: default_minutes(),
            spy_message: default_spy_message(),
            words: None,
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            players = config.default_players,
            minutes = ?config.default_minutes,
            custom_words = config.words.is_some(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the pre-filled player count.
    #[instrument(skip(self))]
    pub fn with_players(mut self, players: usize) -> Self {
        self.default_players = players;
        self
    }

    /// Overrides the pre-filled duration. `0` means untimed.
    #[instrument(skip(self))]
    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.default_minutes = (minutes > 0).then_some(minutes);
        self
    }

    /// Checks that defaults describe a playable round and the word list is usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        RoundConfig::new(self.default_players, self.default_minutes)
            .map_err(|e| ConfigError::new(format!("Invalid defaults: {}", e)))?;
        self.vocabulary()?;
        if self.spy_message.trim().is_empty() {
            return Err(ConfigError::new("spy_message must not be blank".to_string()));
        }
        Ok(())
    }

    /// Vocabulary secrets are drawn from.
    #[instrument(skip(self))]
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        match &self.words {
            Some(words) => Vocabulary::from_words(words)
                .map_err(|e| ConfigError::new(format!("Invalid word list: {}", e))),
            None => Ok(Vocabulary::default()),
        }
    }

    /// Builds the dealer for new rounds.
    #[instrument(skip(self))]
    pub fn dealer(&self) -> Result<Dealer, ConfigError> {
        Ok(Dealer::new(self.vocabulary()?, self.spy_message.clone()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.default_players(), 4);
        assert_eq!(*config.default_minutes(), Some(5));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: GameConfig = toml::from_str("default_players = 6").unwrap();
        assert_eq!(*config.default_players(), 6);
        assert_eq!(config.spy_message(), spy_round::DEFAULT_SPY_MESSAGE);
        assert_eq!(config.log_file(), &PathBuf::from("spy_game.log"));
    }

    #[test]
    fn test_zero_minutes_override_means_untimed() {
        let config = GameConfig::default().with_minutes(0);
        assert_eq!(*config.default_minutes(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_single_player_default_rejected() {
        let config = GameConfig::default().with_players(1);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("Invalid defaults"));
    }

    #[test]
    fn test_blank_word_list_rejected() {
        let config: GameConfig = toml::from_str("words = [\" \", \"\"]").unwrap();
        assert!(config.vocabulary().is_err());
        assert!(config.dealer().is_err());
    }
}
