//! Round countdown.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Formats seconds as `m:ss`.
///
/// Minutes are not padded and may exceed 59.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Countdown for a timed round.
///
/// Starts stopped. Once started it runs until `remaining` hits zero and then
/// stops for good; it can never be restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub(crate) total: u32,
    pub(crate) remaining: u32,
    pub(crate) running: bool,
}

impl Countdown {
    /// Creates a stopped countdown of `seconds`.
    pub fn new(seconds: u32) -> Self {
        Self {
            total: seconds,
            remaining: seconds,
            running: false,
        }
    }

    /// Full duration in seconds.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns true while ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true once the countdown has reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining time formatted as `m:ss`.
    pub fn display(&self) -> String {
        format_countdown(self.remaining)
    }

    /// Starts the countdown. Returns false if it was already started.
    #[instrument(skip(self), fields(remaining = self.remaining))]
    pub(crate) fn start(&mut self) -> bool {
        if self.running || self.remaining < self.total || self.is_expired() {
            return false;
        }
        self.running = true;
        debug!("Countdown started");
        true
    }

    /// Advances by one second. Stops at zero.
    pub(crate) fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            debug!("Countdown expired");
            self.running = false;
        }
    }
}
