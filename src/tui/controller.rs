//! Game controller: the state machine driving the two-screen TUI.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use spy_round::{Dealer, Effect, Round};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{RoundScreen, SetupScreen};
use crate::{ConfigError, GameConfig, SetupForm, Tick, Ticker};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Active screen in the game state machine.
#[derive(Debug)]
enum ActiveScreen {
    Setup(SetupScreen),
    Round(RoundScreen),
}

/// Controller that owns the current screen and the countdown ticker.
///
/// Key events and ticks both funnel through here; every handler runs to
/// completion before the next event is looked at.
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    dealer: Dealer,
    screen: ActiveScreen,
    ticker: Option<Ticker>,
    next_generation: u64,
    tick_tx: UnboundedSender<Tick>,
    tick_rx: UnboundedReceiver<Tick>,
}

impl GameController {
    /// Creates a controller showing the setup form pre-filled from `config`.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        info!("Creating GameController");
        let dealer = config.dealer()?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let screen = ActiveScreen::Setup(SetupScreen::new(Self::blank_form(&config)));
        Ok(Self {
            config,
            dealer,
            screen,
            ticker: None,
            next_generation: 0,
            tick_tx,
            tick_rx,
        })
    }

    fn blank_form(config: &GameConfig) -> SetupForm {
        SetupForm::new(*config.default_players(), *config.default_minutes())
    }

    /// The setup form, while the setup screen is showing.
    pub fn setup_form(&self) -> Option<&SetupForm> {
        match &self.screen {
            ActiveScreen::Setup(s) => Some(s.form()),
            ActiveScreen::Round(_) => None,
        }
    }

    /// The round in progress, if any.
    pub fn round(&self) -> Option<&Round> {
        match &self.screen {
            ActiveScreen::Setup(_) => None,
            ActiveScreen::Round(s) => Some(s.round()),
        }
    }

    /// Returns true while a countdown ticker is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Renders the active screen.
    pub fn render(&self, frame: &mut Frame) {
        match &self.screen {
            ActiveScreen::Setup(s) => s.render(frame),
            ActiveScreen::Round(s) => s.render(frame),
        }
    }

    /// Handles a key press. Returns `false` once the user has quit.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            info!("Ctrl+C pressed");
            return self.apply_transition(ScreenTransition::Quit);
        }

        let transition = match &mut self.screen {
            ActiveScreen::Setup(s) => s.handle_key(key),
            ActiveScreen::Round(s) => s.handle_key(key),
        };
        self.apply_transition(transition)
    }

    /// Delivers a tick to the round. Ticks from a cancelled ticker are dropped.
    #[instrument(skip(self))]
    pub fn handle_tick(&mut self, tick: Tick) -> bool {
        let live = self.ticker.as_ref().map(Ticker::generation);
        if live != Some(tick.generation) {
            debug!(?live, "Discarding stale tick");
            return true;
        }

        let transition = match &mut self.screen {
            ActiveScreen::Round(s) => s.tick(),
            ActiveScreen::Setup(_) => ScreenTransition::Stay,
        };
        self.apply_transition(transition)
    }

    /// Handles every tick that has arrived since the last call.
    pub fn drain_ticks(&mut self) -> bool {
        while let Ok(tick) = self.tick_rx.try_recv() {
            if !self.handle_tick(tick) {
                return false;
            }
        }
        true
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting game event loop");

        loop {
            terminal.draw(|f| self.render(f))?;

            if !self.drain_ticks() {
                return Ok(());
            }

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(key) {
                    info!("Game quitting");
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition. Returns `false` to quit.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        match transition {
            ScreenTransition::Stay => true,

            ScreenTransition::StartRound(config) => {
                info!(players = config.players(), minutes = ?config.minutes(), "Dealing round");
                let round = self.dealer.deal_random(config);
                self.screen = ActiveScreen::Round(RoundScreen::new(round));
                true
            }

            ScreenTransition::Effects(effects) => {
                for effect in effects {
                    match effect {
                        Effect::StartTicker => self.start_ticker(),
                        Effect::StopTicker => self.stop_ticker(),
                        Effect::ShowInstructions => debug!("Instructions shown"),
                    }
                }
                true
            }

            ScreenTransition::BackToSetup => {
                self.stop_ticker();
                info!("Navigating to Setup");
                self.screen = ActiveScreen::Setup(SetupScreen::new(Self::blank_form(&self.config)));
                true
            }

            ScreenTransition::Quit => {
                self.stop_ticker();
                false
            }
        }
    }

    fn start_ticker(&mut self) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.ticker = Some(Ticker::spawn(TICK_PERIOD, generation, self.tick_tx.clone()));
    }

    fn stop_ticker(&mut self) {
        if self.ticker.take().is_some() {
            debug!("Ticker stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spy_round::Phase;

    fn press(controller: &mut GameController, code: KeyCode) -> bool {
        controller.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn config(players: usize, minutes: u32) -> GameConfig {
        GameConfig::default().with_players(players).with_minutes(minutes)
    }

    /// Submits the form and reveals every seat.
    fn play_to_instructions(controller: &mut GameController) {
        press(controller, KeyCode::Enter);
        let seats = controller.round().unwrap().seats().len();
        for seat in 0..seats {
            let digit = char::from_digit(seat as u32 + 1, 10).unwrap();
            press(controller, KeyCode::Char(digit));
            press(controller, KeyCode::Enter);
        }
        assert_eq!(controller.round().unwrap().phase(), Phase::Instructions);
    }

    #[tokio::test]
    async fn test_submit_deals_round() {
        let mut c = GameController::new(config(3, 2)).unwrap();
        assert!(c.setup_form().is_some());
        assert!(press(&mut c, KeyCode::Enter));
        assert_eq!(c.round().unwrap().seats().len(), 3);
    }

    #[tokio::test]
    async fn test_start_timer_spawns_ticker() {
        let mut c = GameController::new(config(2, 1)).unwrap();
        play_to_instructions(&mut c);
        assert!(!c.is_ticking());
        press(&mut c, KeyCode::Char('s'));
        assert!(c.is_ticking());
    }

    #[tokio::test]
    async fn test_stale_tick_ignored() {
        let mut c = GameController::new(config(2, 1)).unwrap();
        play_to_instructions(&mut c);
        press(&mut c, KeyCode::Char('s'));

        assert!(c.handle_tick(Tick { generation: 99 }));
        assert_eq!(c.round().unwrap().countdown_display().as_deref(), Some("1:00"));

        assert!(c.handle_tick(Tick { generation: 0 }));
        assert_eq!(c.round().unwrap().countdown_display().as_deref(), Some("0:59"));
    }

    #[tokio::test]
    async fn test_reset_cancels_ticker_and_restores_form() {
        let mut c = GameController::new(config(2, 1)).unwrap();
        play_to_instructions(&mut c);
        press(&mut c, KeyCode::Char('s'));
        press(&mut c, KeyCode::Char('r'));

        assert!(!c.is_ticking());
        assert!(c.round().is_none());
        assert_eq!(c.setup_form().unwrap().players(), "2");
    }

    #[tokio::test]
    async fn test_expiry_stops_ticker() {
        let mut c = GameController::new(config(2, 1)).unwrap();
        play_to_instructions(&mut c);
        press(&mut c, KeyCode::Char('s'));
        for _ in 0..60 {
            c.handle_tick(Tick { generation: 0 });
        }
        assert_eq!(c.round().unwrap().phase(), Phase::TimeUp);
        assert!(!c.is_ticking());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut c = GameController::new(GameConfig::default()).unwrap();
        assert!(!c.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
