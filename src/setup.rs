//! Setup form: collects player count and round length.
//!
//! The form holds raw text for each field and only produces a
//! [`RoundConfig`] when both fields pass validation. A refused submission
//! leaves the input untouched so the user can correct it.

use derive_getters::Getters;
use derive_more::Display;
use spy_round::{RoundConfig, SetupError};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument};

/// Longest input accepted per field.
const MAX_DIGITS: usize = 3;

/// Editable fields on the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Field {
    /// Number of players.
    #[display("Number of Players")]
    Players,
    /// Round length in minutes.
    #[display("Game Duration (minutes)")]
    Minutes,
}

/// State of the setup form.
#[derive(Debug, Clone, Getters)]
pub struct SetupForm {
    players: String,
    minutes: String,
    focus: Field,
    error: Option<SetupError>,
    #[getter(skip)]
    default_players: String,
    #[getter(skip)]
    default_minutes: String,
}

impl SetupForm {
    /// Creates a form pre-filled with the given defaults.
    #[instrument]
    pub fn new(default_players: usize, default_minutes: Option<u32>) -> Self {
        let default_players = default_players.to_string();
        let default_minutes = default_minutes.map(|m| m.to_string()).unwrap_or_default();
        Self {
            players: default_players.clone(),
            minutes: default_minutes.clone(),
            focus: Field::Players,
            error: None,
            default_players,
            default_minutes,
        }
    }

    /// Text currently in `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Players => &self.players,
            Field::Minutes => &self.minutes,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Players => &mut self.players,
            Field::Minutes => &mut self.minutes,
        }
    }

    /// Moves focus to the next field, wrapping.
    #[instrument(skip(self))]
    pub fn focus_next(&mut self) {
        let fields: Vec<Field> = Field::iter().collect();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    /// Moves focus to the previous field, wrapping.
    #[instrument(skip(self))]
    pub fn focus_previous(&mut self) {
        let fields: Vec<Field> = Field::iter().collect();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Types a character into the focused field. Non-digits are ignored.
    #[instrument(skip(self))]
    pub fn push_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            debug!("Ignoring non-digit input");
            return;
        }
        let field = self.focus;
        let value = self.value_mut(field);
        if value.len() >= MAX_DIGITS {
            return;
        }
        value.push(c);
        self.error = None;
    }

    /// Deletes the last character of the focused field.
    #[instrument(skip(self))]
    pub fn backspace(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
        self.error = None;
    }

    /// Parses both fields into a [`RoundConfig`] without changing the form.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<RoundConfig, SetupError> {
        let players = self
            .players
            .trim()
            .parse::<usize>()
            .map_err(|_| SetupError::NotANumber("Number of players"))?;

        let minutes = match self.minutes.trim() {
            "" => None,
            text => Some(
                text.parse::<u32>()
                    .map_err(|_| SetupError::NotANumber("Game duration"))?,
            ),
        };

        RoundConfig::new(players, minutes)
    }

    /// Submits the form.
    ///
    /// Returns the config on success. On failure records the error and
    /// returns `None`; the field text is kept as typed.
    #[instrument(skip(self))]
    pub fn submit(&mut self) -> Option<RoundConfig> {
        match self.validate() {
            Ok(config) => {
                info!(players = config.players(), minutes = ?config.minutes(), "Setup submitted");
                self.error = None;
                Some(config)
            }
            Err(e) => {
                info!(error = %e, "Setup refused");
                self.error = Some(e);
                None
            }
        }
    }

    /// Returns the form to its defaults.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.players = self.default_players.clone();
        self.minutes = self.default_minutes.clone();
        self.focus = Field::Players;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> SetupForm {
        let mut form = SetupForm::new(2, None);
        form.backspace();
        form
    }

    #[test]
    fn test_prefilled_defaults_submit() {
        let mut form = SetupForm::new(5, Some(3));
        let config = form.submit().expect("defaults are valid");
        assert_eq!(config.players(), 5);
        assert_eq!(config.minutes(), Some(3));
    }

    #[test]
    fn test_refused_submission_keeps_input() {
        let mut form = blank();
        form.push_char('1');
        assert!(form.submit().is_none());
        assert_eq!(form.players(), "1");
        assert_eq!(form.error(), &Some(SetupError::TooFewPlayers(1)));
    }

    #[test]
    fn test_empty_players_is_not_a_number() {
        let mut form = blank();
        assert!(form.submit().is_none());
        assert!(matches!(form.error(), Some(SetupError::NotANumber(_))));
    }

    #[test]
    fn test_blank_minutes_is_untimed() {
        let form = SetupForm::new(3, None);
        assert_eq!(form.validate().unwrap().minutes(), None);
    }

    #[test]
    fn test_zero_minutes_refused() {
        let mut form = SetupForm::new(3, None);
        form.focus_next();
        form.push_char('0');
        assert_eq!(form.validate(), Err(SetupError::DurationTooShort));
    }

    #[test]
    fn test_non_digits_ignored() {
        let mut form = blank();
        form.push_char('x');
        form.push_char('-');
        form.push_char('4');
        assert_eq!(form.players(), "4");
    }

    #[test]
    fn test_field_length_capped() {
        let mut form = blank();
        for _ in 0..6 {
            form.push_char('9');
        }
        assert_eq!(form.players().len(), MAX_DIGITS);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = SetupForm::new(3, None);
        assert_eq!(*form.focus(), Field::Players);
        form.focus_next();
        assert_eq!(*form.focus(), Field::Minutes);
        form.focus_next();
        assert_eq!(*form.focus(), Field::Players);
        form.focus_previous();
        assert_eq!(*form.focus(), Field::Minutes);
    }

    #[test]
    fn test_editing_clears_error() {
        let mut form = blank();
        form.submit();
        assert!(form.error().is_some());
        form.push_char('3');
        assert!(form.error().is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = SetupForm::new(6, Some(8));
        form.backspace();
        form.focus_next();
        form.backspace();
        form.submit();
        form.reset();
        assert_eq!(form.players(), "6");
        assert_eq!(form.minutes(), "8");
        assert_eq!(*form.focus(), Field::Players);
        assert!(form.error().is_none());
    }
}
