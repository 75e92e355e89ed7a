//! Seats and roles.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// What a seat learns when it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Role {
    /// Does not know the word and must bluff.
    Spy,
    /// Knows the round's secret word.
    Civilian,
}

/// One player position at the table.
///
/// Identity is the seat's index in the round; there is no separate id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    role: Role,
    revealed: bool,
}

impl Seat {
    /// Creates an unrevealed seat with the given role.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            revealed: false,
        }
    }

    /// Returns true if this seat is the spy.
    pub fn is_spy(&self) -> bool {
        self.role == Role::Spy
    }

    /// Returns true once the seat has viewed its role.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Marks the seat revealed. One-way.
    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }
}
