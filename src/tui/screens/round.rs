//! Round screen: seat grid, reveal dialog, instructions, and countdown.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use spy_round::{Command, Phase, Round, Transition, format_countdown};
use tracing::{debug, instrument, warn};

use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{draw_help, draw_modal, draw_title};

/// Fewest seats per grid row.
const MIN_COLUMNS: usize = 3;

/// Most grid rows before columns are added instead.
const MAX_ROWS: usize = 4;

/// Tile height when the seat area has room for it.
const TALL_TILE: u16 = 4;

/// Bordered tile with a one-line body.
const SHORT_TILE: u16 = 3;

/// State for the round screen.
#[derive(Debug)]
pub struct RoundScreen {
    round: Round,
    cursor: usize,
    notice: Option<String>,
}

impl RoundScreen {
    /// Creates a round screen for a freshly dealt round.
    #[instrument(
        skip(round),
        fields(players = round.config().players(), minutes = ?round.config().minutes())
    )]
    pub fn new(round: Round) -> Self {
        debug!("Initializing RoundScreen");
        Self {
            round,
            cursor: 0,
            notice: None,
        }
    }

    /// Current round snapshot.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Highlighted seat.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last rejected command, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Feeds a one-second tick to the round.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> ScreenTransition {
        self.dispatch(Command::Tick)
    }

    /// Applies a command and turns the outcome into a screen transition.
    #[instrument(skip(self))]
    fn dispatch(&mut self, command: Command) -> ScreenTransition {
        match self.round.apply(command) {
            Ok(Transition::Continue { round, effects }) => {
                self.round = round;
                self.notice = None;
                if effects.is_empty() {
                    ScreenTransition::Stay
                } else {
                    ScreenTransition::Effects(effects)
                }
            }
            Ok(Transition::Reset) => ScreenTransition::BackToSetup,
            Err(e) => {
                warn!(error = %e, %command, "Command rejected");
                self.notice = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }

    /// Seats per grid row. At least three; wider tables get more columns so
    /// the grid stays within four rows.
    pub fn columns(&self) -> usize {
        self.round.seats().len().div_ceil(MAX_ROWS).max(MIN_COLUMNS)
    }

    /// Moves the seat cursor with the arrow keys, staying inside the grid.
    fn move_cursor(&mut self, key: KeyCode) {
        let seats = self.round.seats().len();
        let cols = self.columns();
        let c = self.cursor;
        self.cursor = match key {
            KeyCode::Left if c % cols > 0 => c - 1,
            KeyCode::Right if c % cols < cols - 1 && c + 1 < seats => c + 1,
            KeyCode::Up if c >= cols => c - cols,
            KeyCode::Down if c + cols < seats => c + cols,
            _ => c,
        };
    }

    fn status_text(&self) -> String {
        let round = &self.round;
        match round.phase() {
            Phase::Revealing => format!(
                "Revealed {}/{}. Pass the terminal around; each player opens their own seat.",
                round.revealed_count(),
                round.seats().len()
            ),
            Phase::Instructions => match round.countdown() {
                Some(countdown) => format!(
                    "Everyone has seen their role. Take turns asking questions to find the spy. \
                     Press S to start the {} timer.",
                    format_countdown(countdown.total())
                ),
                None => "Everyone has seen their role. Take turns asking questions to find the spy."
                    .to_string(),
            },
            Phase::Countdown => format!(
                "Time left: {}",
                round.countdown_display().unwrap_or_default()
            ),
            Phase::TimeUp => "Time's up! Vote for the spy.".to_string(),
        }
    }

    fn help_text(&self) -> &'static str {
        if self.round.active_dialog().is_some() {
            return "Enter/Esc: Close";
        }
        match self.round.phase() {
            Phase::Revealing => "←→↑↓: Seat | Enter/1-9: Reveal | R: Reset | Q: Quit",
            Phase::Instructions if self.round.countdown().is_some() => {
                "S/Enter: Start Timer | R: Reset | Q: Quit"
            }
            _ => "R: Reset | Q: Quit",
        }
    }

    fn draw_seats(&self, frame: &mut Frame, area: Rect) {
        let seats = self.round.seats();
        let columns = self.columns();
        let rows = seats.len().div_ceil(columns);
        let tile_height = if rows as u16 * TALL_TILE <= area.height {
            TALL_TILE
        } else {
            SHORT_TILE
        };

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(tile_height); rows])
            .split(area);

        for (r, row_area) in row_areas.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row_area);

            for (c, cell) in cols.iter().enumerate() {
                let i = r * columns + c;
                let Some(seat) = seats.get(i) else {
                    continue;
                };

                let (mark, style) = if seat.is_revealed() {
                    ("✓ seen", Style::default().fg(Color::DarkGray))
                } else {
                    ("?", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                };

                let border = if i == self.cursor && self.round.phase() == Phase::Revealing {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let tile = Paragraph::new(mark)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border)
                            .title(format!("Player {}", i + 1)),
                    );
                frame.render_widget(tile, *cell);
            }
        }
    }
}

impl Screen for RoundScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(area);

        draw_title(frame, chunks[0], "Game in Progress");

        let (status, color) = match (&self.notice, self.round.phase()) {
            (Some(notice), _) => (notice.clone(), Color::Red),
            (None, Phase::Countdown) => (self.status_text(), Color::Magenta),
            (None, Phase::TimeUp) => (self.status_text(), Color::Red),
            (None, _) => (self.status_text(), Color::Yellow),
        };
        let status = Paragraph::new(status)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, chunks[1]);

        self.draw_seats(frame, chunks[2]);
        draw_help(frame, chunks[3], self.help_text());

        if let Some(dialog) = self.round.dialog() {
            draw_modal(frame, &dialog.title, &dialog.content, "Enter: Close");
        }
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if self.round.active_dialog().is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    self.dispatch(Command::CloseDialog)
                }
                _ => ScreenTransition::Stay,
            };
        }

        match (self.round.phase(), key.code) {
            (_, KeyCode::Char('q') | KeyCode::Char('Q')) => ScreenTransition::Quit,
            (_, KeyCode::Char('r') | KeyCode::Char('R')) => self.dispatch(Command::Reset),

            (Phase::Revealing, KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down) => {
                self.move_cursor(key.code);
                ScreenTransition::Stay
            }
            (Phase::Revealing, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.dispatch(Command::Reveal(self.cursor))
            }
            (Phase::Revealing, KeyCode::Char(c)) if ('1'..='9').contains(&c) => {
                let seat = (c as usize) - ('1' as usize);
                if seat < self.round.seats().len() {
                    self.cursor = seat;
                }
                self.dispatch(Command::Reveal(seat))
            }

            (Phase::Instructions, KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S')) => {
                self.dispatch(Command::StartTimer)
            }

            _ => ScreenTransition::Stay,
        }
    }
}
