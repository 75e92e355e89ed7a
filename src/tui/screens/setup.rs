//! Setup screen: enter player count and duration, then start a round.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::SetupForm;
use crate::setup::Field;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{center_rect, draw_help, draw_title};

/// State for the setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    form: SetupForm,
}

impl SetupScreen {
    /// Creates a setup screen around a form.
    #[instrument(skip(form))]
    pub fn new(form: SetupForm) -> Self {
        debug!("Initializing SetupScreen");
        Self { form }
    }

    /// The underlying form.
    pub fn form(&self) -> &SetupForm {
        &self.form
    }

    fn draw_field(&self, frame: &mut Frame, area: Rect, field: Field) {
        let focused = *self.form.focus() == field;
        let value = self.form.value(field);
        let shown = if focused {
            format!("{}_", value)
        } else if value.is_empty() && field == Field::Minutes {
            "(untimed)".to_string()
        } else {
            value.to_string()
        };

        let border = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let input = Paragraph::new(shown).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.to_string()),
        );
        frame.render_widget(input, area);
    }
}

impl Screen for SetupScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(3),
            ])
            .split(area);

        draw_title(frame, chunks[0], "Spy Game");

        let form_area = center_rect(chunks[1], 40, 9);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(form_area);

        for (i, field) in Field::iter().enumerate() {
            self.draw_field(frame, rows[i], field);
        }

        if let Some(error) = self.form.error() {
            let message = Paragraph::new(error.to_string())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            frame.render_widget(message, rows[2]);
        }

        draw_help(
            frame,
            chunks[2],
            "0-9: Type | Tab/↑↓: Field | Enter: Start Game | Esc: Quit",
        );
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.form.push_char(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.form.backspace();
                ScreenTransition::Stay
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                ScreenTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_previous();
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.form.submit() {
                Some(config) => {
                    info!(players = config.players(), "Starting round from setup");
                    ScreenTransition::StartRound(config)
                }
                None => ScreenTransition::Stay,
            },
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut SetupScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_with_valid_form_starts_round() {
        let mut screen = SetupScreen::new(SetupForm::new(3, Some(2)));
        match press(&mut screen, KeyCode::Enter) {
            ScreenTransition::StartRound(config) => {
                assert_eq!(config.players(), 3);
                assert_eq!(config.minutes(), Some(2));
            }
            other => panic!("expected StartRound, got {:?}", other),
        }
    }

    #[test]
    fn test_enter_with_invalid_form_stays() {
        let mut screen = SetupScreen::new(SetupForm::new(3, None));
        press(&mut screen, KeyCode::Backspace);
        press(&mut screen, KeyCode::Char('1'));
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Stay);
        assert!(screen.form().error().is_some());
        assert_eq!(screen.form().players(), "1");
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut screen = SetupScreen::new(SetupForm::new(3, None));
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char('7'));
        assert_eq!(screen.form().minutes(), "7");
        assert_eq!(screen.form().players(), "3");
    }

    #[test]
    fn test_q_quits() {
        let mut screen = SetupScreen::new(SetupForm::new(3, None));
        assert_eq!(press(&mut screen, KeyCode::Char('q')), ScreenTransition::Quit);
    }
}
