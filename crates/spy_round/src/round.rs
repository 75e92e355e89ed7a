//! The round reducer.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::action::{Command, Effect, RoundError, Transition};
use super::config::RoundConfig;
use super::contracts::{Contract, RevealContract, TickContract};
use super::countdown::Countdown;
use super::phases::Phase;
use super::types::Seat;

/// A single round of the spy game.
///
/// Rounds are created by [`Dealer::deal`](crate::Dealer::deal) and advanced
/// only through [`Round::apply`], which never mutates `self`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub(crate) config: RoundConfig,
    pub(crate) seats: Vec<Seat>,
    pub(crate) spy_index: usize,
    pub(crate) secret_word: String,
    pub(crate) spy_message: String,
    pub(crate) active_dialog: Option<usize>,
    pub(crate) phase: Phase,
    pub(crate) countdown: Option<Countdown>,
}

/// What the open reveal dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogView {
    /// Seat the dialog belongs to.
    pub seat: usize,
    /// Dialog heading.
    pub title: String,
    /// The secret word, or the spy message.
    pub content: String,
}

impl Round {
    /// Configuration the round was dealt from.
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Seats in table order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Index of the spy's seat.
    pub fn spy_index(&self) -> usize {
        self.spy_index
    }

    /// The word every non-spy sees.
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seat whose dialog is open, if any.
    pub fn active_dialog(&self) -> Option<usize> {
        self.active_dialog
    }

    /// Countdown, for timed rounds.
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Remaining time as `m:ss`, for timed rounds.
    pub fn countdown_display(&self) -> Option<String> {
        self.countdown.as_ref().map(Countdown::display)
    }

    /// Number of seats that have revealed.
    pub fn revealed_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_revealed()).count()
    }

    /// True iff every seat has revealed.
    pub fn all_revealed(&self) -> bool {
        self.seats.iter().all(Seat::is_revealed)
    }

    /// What `seat` sees on reveal.
    ///
    /// Derived from the seat's role and the round's fixed secret, so asking
    /// twice always gives the same answer.
    pub fn reveal_text(&self, seat: usize) -> Option<&str> {
        self.seats.get(seat).map(|s| {
            if s.is_spy() {
                self.spy_message.as_str()
            } else {
                self.secret_word.as_str()
            }
        })
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<DialogView> {
        let seat = self.active_dialog?;
        let content = self.reveal_text(seat)?.to_string();
        Some(DialogView {
            seat,
            title: format!("Player {}: Your Word", seat + 1),
            content,
        })
    }

    /// Applies a command and returns the resulting transition.
    ///
    /// Redundant commands produce an unchanged round with no effects.
    #[instrument(skip(self), fields(phase = %self.phase, revealed = self.revealed_count()))]
    pub fn apply(&self, command: Command) -> Result<Transition, RoundError> {
        match command {
            Command::Reveal(seat) => self.reveal(seat),
            Command::CloseDialog => Ok(self.close_dialog()),
            Command::StartTimer => Ok(self.start_timer()),
            Command::Tick => self.tick(),
            Command::Reset => {
                info!("Round reset");
                Ok(Transition::Reset)
            }
        }
    }

    fn reveal(&self, seat: usize) -> Result<Transition, RoundError> {
        RevealContract::pre(self, &seat)?;

        if self.seats[seat].is_revealed() {
            debug!(seat, "Seat already revealed");
            return Ok(Transition::unchanged(self));
        }
        if let Some(open) = self.active_dialog {
            debug!(seat, open, "Another dialog is open");
            return Ok(Transition::unchanged(self));
        }

        let mut next = self.clone();
        next.seats[seat].reveal();
        next.active_dialog = Some(seat);

        #[cfg(debug_assertions)]
        RevealContract::post(self, &next)?;

        info!(seat, remaining = next.seats.len() - next.revealed_count(), "Seat revealed");
        Ok(Transition::Continue {
            round: next,
            effects: Vec::new(),
        })
    }

    fn close_dialog(&self) -> Transition {
        let Some(seat) = self.active_dialog else {
            return Transition::unchanged(self);
        };

        let mut next = self.clone();
        next.active_dialog = None;
        let mut effects = Vec::new();

        if next.phase == Phase::Revealing && next.all_revealed() {
            info!("All seats revealed");
            next.phase = Phase::Instructions;
            effects.push(Effect::ShowInstructions);
        }

        debug!(seat, "Dialog closed");
        Transition::Continue {
            round: next,
            effects,
        }
    }

    fn start_timer(&self) -> Transition {
        if self.phase != Phase::Instructions {
            debug!("Timer not startable in this phase");
            return Transition::unchanged(self);
        }

        let mut next = self.clone();
        let started = next.countdown.as_mut().is_some_and(|c| c.start());
        if !started {
            debug!("Untimed round; nothing to start");
            return Transition::unchanged(self);
        }

        next.phase = Phase::Countdown;
        info!(seconds = next.countdown.map(|c| c.remaining()), "Timer started");
        Transition::Continue {
            round: next,
            effects: vec![Effect::StartTicker],
        }
    }

    fn tick(&self) -> Result<Transition, RoundError> {
        TickContract::pre(self, &())?;

        if self.phase != Phase::Countdown {
            debug!("Stray tick ignored");
            return Ok(Transition::unchanged(self));
        }

        let mut next = self.clone();
        let mut effects = Vec::new();
        if let Some(countdown) = next.countdown.as_mut() {
            countdown.tick();
            if countdown.is_expired() {
                info!("Time up");
                next.phase = Phase::TimeUp;
                effects.push(Effect::StopTicker);
            }
        }

        #[cfg(debug_assertions)]
        TickContract::post(self, &next)?;

        Ok(Transition::Continue {
            round: next,
            effects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dealer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    fn round(players: usize, minutes: Option<u32>) -> Round {
        let config = RoundConfig::new(players, minutes).unwrap();
        Dealer::default().deal(config, &mut StdRng::seed_from_u64(11))
    }

    fn step(round: &Round, command: Command) -> (Round, Vec<Effect>) {
        match round.apply(command).expect("command applies") {
            Transition::Continue { round, effects } => (round, effects),
            Transition::Reset => panic!("unexpected reset"),
        }
    }

    fn reveal_all(mut round: Round) -> Round {
        for seat in 0..round.seats().len() {
            round = step(&round, Command::Reveal(seat)).0;
            round = step(&round, Command::CloseDialog).0;
        }
        round
    }

    #[test]
    fn test_reveal_opens_dialog_for_seat() {
        let r = round(3, None);
        let (r, effects) = step(&r, Command::Reveal(1));
        assert!(effects.is_empty());
        assert_eq!(r.active_dialog(), Some(1));
        let dialog = r.dialog().unwrap();
        assert_eq!(dialog.seat, 1);
        assert_eq!(dialog.content, r.reveal_text(1).unwrap());
    }

    #[test]
    fn test_reveal_out_of_range_is_error() {
        let r = round(3, None);
        assert_eq!(
            r.apply(Command::Reveal(3)).unwrap_err(),
            RoundError::SeatOutOfRange { seat: 3, seats: 3 }
        );
    }

    #[test]
    fn test_reveal_blocked_while_dialog_open() {
        let r = round(3, None);
        let (r, _) = step(&r, Command::Reveal(0));
        let (after, _) = step(&r, Command::Reveal(2));
        assert_eq!(after, r);
        assert!(!after.seats()[2].is_revealed());
    }

    #[test]
    fn test_close_without_dialog_is_noop() {
        let r = round(2, None);
        let (after, effects) = step(&r, Command::CloseDialog);
        assert_eq!(after, r);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_last_close_enters_instructions() {
        let r = round(2, Some(1));
        let (r, _) = step(&r, Command::Reveal(0));
        let (r, effects) = step(&r, Command::CloseDialog);
        assert!(effects.is_empty());
        assert_eq!(r.phase(), Phase::Revealing);

        let (r, _) = step(&r, Command::Reveal(1));
        assert!(r.all_revealed());
        assert_eq!(r.phase(), Phase::Revealing);

        let (r, effects) = step(&r, Command::CloseDialog);
        assert_eq!(effects, vec![Effect::ShowInstructions]);
        assert_eq!(r.phase(), Phase::Instructions);
    }

    #[test]
    fn test_start_timer_before_reveals_is_noop() {
        let r = round(3, Some(1));
        let (after, effects) = step(&r, Command::StartTimer);
        assert_eq!(after, r);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_untimed_round_never_counts_down() {
        let r = reveal_all(round(3, None));
        assert_eq!(r.phase(), Phase::Instructions);
        let (after, effects) = step(&r, Command::StartTimer);
        assert_eq!(after.phase(), Phase::Instructions);
        assert!(effects.is_empty());
        assert_eq!(after.countdown_display(), None);
    }

    #[test]
    fn test_timer_expiry_stops_ticker() {
        let r = reveal_all(round(2, Some(1)));
        let (mut r, effects) = step(&r, Command::StartTimer);
        assert_eq!(effects, vec![Effect::StartTicker]);

        for _ in 0..59 {
            let (next, effects) = step(&r, Command::Tick);
            assert!(effects.is_empty());
            r = next;
        }
        assert_eq!(r.countdown_display().as_deref(), Some("0:01"));

        let (r, effects) = step(&r, Command::Tick);
        assert_eq!(effects, vec![Effect::StopTicker]);
        assert_eq!(r.phase(), Phase::TimeUp);

        let (after, effects) = step(&r, Command::Tick);
        assert_eq!(after, r);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reset_from_any_phase() {
        let r = round(2, Some(1));
        assert!(matches!(r.apply(Command::Reset), Ok(Transition::Reset)));
        let r = reveal_all(r);
        let (r, _) = step(&r, Command::StartTimer);
        let transition = r.apply(Command::Reset).unwrap();
        assert_eq!(transition.effects(), &[Effect::StopTicker]);
        assert!(transition.into_round().is_none());
    }

    #[test]
    fn test_phase_all_revealed_flag() {
        for phase in Phase::iter() {
            assert_eq!(phase.all_revealed(), phase != Phase::Revealing);
        }
    }
}
