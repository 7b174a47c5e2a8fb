//! Per-hold tick scheduling
//!
//! While a hold is in progress something must fire every tick interval so the
//! elapsed duration advances. The schedule is represented by a [`TickTask`]
//! guard: dropping the guard cancels the ticks, so a hold can never leave a
//! timer running behind it.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Identifies one hold cycle
pub type HoldId = u64;

/// A tick for a specific hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTick {
    pub hold: HoldId,
}

/// Guard for a scheduled tick source. Dropping it cancels the ticks.
pub struct TickTask {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickTask {
    /// Guard that runs `cancel` exactly once, when dropped
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Guard with nothing to cancel
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TickTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickTask")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Starts periodic ticks for a hold
pub trait TickScheduler {
    fn schedule(&mut self, hold: HoldId, period: Duration) -> TickTask;
}

/// Tokio interval ticks delivered over a channel.
///
/// Each hold gets its own spawned task; the first tick arrives one period
/// after the hold starts. Must be used from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    tx: mpsc::UnboundedSender<HoldTick>,
}

impl IntervalTicker {
    pub fn new(tx: mpsc::UnboundedSender<HoldTick>) -> Self {
        Self { tx }
    }

    /// Ticker plus the receiving end the event loop should poll
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HoldTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl TickScheduler for IntervalTicker {
    fn schedule(&mut self, hold: HoldId, period: Duration) -> TickTask {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(HoldTick { hold }).is_err() {
                    // Receiver gone, nobody to tick for
                    break;
                }
            }
        });

        TickTask::new(move || {
            tracing::trace!("Cancelling ticks for hold {}", hold);
            handle.abort();
        })
    }
}
