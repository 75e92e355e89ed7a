//! One-second tick scheduling for the round countdown.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument};

/// A tick delivered to the UI loop.
///
/// Carries the generation of the [`Ticker`] that sent it so ticks still in
/// flight from a cancelled ticker can be told apart from live ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    /// Generation of the sending ticker.
    pub generation: u64,
}

/// Guard for a recurring tick task. Aborts the task on drop.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
    generation: u64,
}

impl Ticker {
    /// Spawns a task sending a [`Tick`] every `period`.
    ///
    /// The first tick arrives one full period after spawning. The task ends
    /// on its own if the receiving side is dropped.
    #[instrument(skip(tx))]
    pub fn spawn(period: Duration, generation: u64, tx: UnboundedSender<Tick>) -> Self {
        info!("Starting ticker");
        let handle = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    debug!(generation, "Tick receiver gone, ticker exiting");
                    break;
                }
            }
        });
        Self { handle, generation }
    }

    /// Generation this ticker stamps on its ticks.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        debug!(generation = self.generation, "Cancelling ticker");
        self.handle.abort();
    }
}
