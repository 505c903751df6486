//! Deterministic timer driver over simulated milliseconds.
//!
//! Mirrors what the tokio player does with a real interval: when the
//! controller's timer epoch changes, the next firing is scheduled one period
//! after the current simulated time; after each firing the next one is a
//! period later.

use crate::controller::{PlaybackController, TickOutcome, TimerEpoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    epoch: TimerEpoch,
    due_ms: u64,
    period_ms: u64,
}

/// Simulated clock that delivers ticks to a controller
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: u64,
    pending: Option<Pending>,
}

impl VirtualClock {
    /// Clock at time zero with nothing scheduled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Time of the next scheduled firing
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.map(|p| p.due_ms)
    }

    /// Pick up timer starts, restarts and cancellations from `controller`
    pub fn sync(&mut self, controller: &PlaybackController) {
        match controller.timer() {
            None => self.pending = None,
            Some(timer) if self.pending.map(|p| p.epoch) != Some(timer.epoch) => {
                let period_ms = u64::try_from(timer.period.as_millis()).unwrap_or(u64::MAX);
                self.pending = Some(Pending {
                    epoch: timer.epoch,
                    due_ms: self.now_ms.saturating_add(period_ms),
                    period_ms,
                });
            }
            Some(_) => {}
        }
    }

    /// Advance simulated time by `ms`, delivering every tick that falls due
    pub fn advance(&mut self, controller: &mut PlaybackController, ms: u64) -> Vec<TickOutcome> {
        let target = self.now_ms.saturating_add(ms);
        let mut outcomes = Vec::new();
        loop {
            self.sync(controller);
            let Some(pending) = self.pending.filter(|p| p.due_ms <= target) else {
                break;
            };
            self.now_ms = pending.due_ms;
            outcomes.push(controller.tick(pending.epoch));
            self.pending = Some(Pending {
                due_ms: pending.due_ms.saturating_add(pending.period_ms),
                ..pending
            });
        }
        self.now_ms = target;
        outcomes
    }
}
