//! Screen implementations.

mod round;
mod setup;

pub use round::RoundScreen;
pub use setup::SetupScreen;
