//! Playback state machine over one immutable trace.
//!
//! The controller owns the only mutable playback state. It never sleeps and
//! never spawns: "starting the timer" means recording an [`ActiveTimer`]
//! with a fresh [`TimerEpoch`], and a driver (the virtual clock in tests,
//! the tokio player at runtime) delivers ticks tagged with that epoch. A
//! tick carrying any other epoch is stale and changes nothing.

use algolab_core::{SpeedDial, Step, Trace};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Not advancing
    Idle,
    /// Auto-advancing on the timer
    Playing,
    /// Advance suspended, index retained
    Paused,
    /// Index has reached the end of the trace
    Completed,
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Completed => "completed",
        };
        f.write_str(text)
    }
}

/// Identity of one timer start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    /// Raw counter value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// The repeating timer the controller currently wants running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTimer {
    /// Epoch ticks must carry
    pub epoch: TimerEpoch,
    /// Firing period
    pub period: Duration,
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved forward to the given index
    Advanced(usize),
    /// Moved forward to the end; the timer is gone
    Completed(usize),
    /// Tick came from a timer that is no longer active
    Stale,
}

/// Serializable view of the playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current position, `0..=len`
    pub current_index: usize,
    /// Status
    pub status: PlaybackStatus,
    /// Speed dial
    pub speed: SpeedDial,
}

/// Playback controller for one trace
#[derive(Debug, Clone)]
pub struct PlaybackController {
    trace: Arc<Trace>,
    current_index: usize,
    status: PlaybackStatus,
    speed: SpeedDial,
    timer: Option<ActiveTimer>,
    epochs: u64,
}

impl PlaybackController {
    /// Controller at the start of `trace`
    #[must_use]
    pub fn new(trace: Arc<Trace>, speed: SpeedDial) -> Self {
        let status = Self::initial_status(&trace);
        Self {
            trace,
            current_index: 0,
            status,
            speed,
            timer: None,
            epochs: 0,
        }
    }

    fn initial_status(trace: &Trace) -> PlaybackStatus {
        if trace.is_empty() {
            PlaybackStatus::Completed
        } else {
            PlaybackStatus::Idle
        }
    }

    /// Trace being played
    #[must_use]
    pub fn trace(&self) -> &Arc<Trace> {
        &self.trace
    }

    /// Current position, `0..=len`
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Trace length, which is also the largest valid index
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether the trace has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Speed dial
    #[must_use]
    pub fn speed(&self) -> SpeedDial {
        self.speed
    }

    /// Timer that should be running, if any
    #[must_use]
    pub fn timer(&self) -> Option<ActiveTimer> {
        self.timer
    }

    /// Step at the current index; `None` once past the end
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.trace.get(self.current_index)
    }

    /// Snapshot of the playback state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current_index,
            status: self.status,
            speed: self.speed,
        }
    }

    fn start_timer(&mut self) {
        self.epochs += 1;
        self.timer = Some(ActiveTimer {
            epoch: TimerEpoch(self.epochs),
            period: self.speed.interval(),
        });
    }

    fn at_end(&self) -> bool {
        self.current_index >= self.trace.len()
    }

    /// Start auto-advancing from `Idle` or `Paused`.
    ///
    /// No-op while playing, on an empty trace, or at the end.
    pub fn play(&mut self) {
        if self.is_empty() || self.status == PlaybackStatus::Playing {
            return;
        }
        if self.at_end() {
            self.status = PlaybackStatus::Completed;
            return;
        }
        self.status = PlaybackStatus::Playing;
        self.start_timer();
        debug!(index = self.current_index, period_ms = self.speed.interval_ms(), "playing");
    }

    /// Suspend auto-advance, keeping the index
    pub fn pause(&mut self) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        self.status = PlaybackStatus::Paused;
        self.timer = None;
        debug!(index = self.current_index, "paused");
    }

    /// Deliver a timer firing tagged with `epoch`
    pub fn tick(&mut self, epoch: TimerEpoch) -> TickOutcome {
        if self.timer.map(|t| t.epoch) != Some(epoch) {
            debug!(epoch = epoch.as_u64(), "stale tick ignored");
            return TickOutcome::Stale;
        }
        self.current_index = (self.current_index + 1).min(self.trace.len());
        if self.at_end() {
            self.status = PlaybackStatus::Completed;
            self.timer = None;
            debug!(steps = self.trace.len(), "playback completed");
            TickOutcome::Completed(self.current_index)
        } else {
            TickOutcome::Advanced(self.current_index)
        }
    }

    /// Move one step forward; ignored while playing
    pub fn step_forward(&mut self) {
        if self.is_empty() || self.status == PlaybackStatus::Playing {
            return;
        }
        self.move_to(self.current_index + 1);
    }

    /// Move one step back; ignored while playing
    pub fn step_backward(&mut self) {
        if self.is_empty() || self.status == PlaybackStatus::Playing {
            return;
        }
        self.move_to(self.current_index.saturating_sub(1));
    }

    /// Jump to `index`, clamped to `0..=len`. Pauses first if playing.
    pub fn seek(&mut self, index: usize) {
        if self.is_empty() {
            return;
        }
        self.pause();
        self.move_to(index);
    }

    fn move_to(&mut self, index: usize) {
        self.current_index = index.min(self.trace.len());
        if self.at_end() {
            self.status = PlaybackStatus::Completed;
        } else if self.status == PlaybackStatus::Completed {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Back to index 0 and `Idle`, cancelling any timer
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.status = PlaybackStatus::Idle;
        self.timer = None;
        debug!("reset");
    }

    /// Change the speed dial. A running timer restarts at the new period.
    pub fn set_speed(&mut self, speed: SpeedDial) {
        self.speed = speed;
        if self.status == PlaybackStatus::Playing {
            self.start_timer();
            debug!(period_ms = speed.interval_ms(), "timer restarted");
        }
    }

    /// Replace the trace and start over
    pub fn retrace(&mut self, trace: Arc<Trace>) {
        self.timer = None;
        self.trace = trace;
        self.current_index = 0;
        self.status = Self::initial_status(&self.trace);
        debug!(steps = self.trace.len(), "retraced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolab_core::Algorithm;
    use algolab_trace::searching::binary_search;
    use algolab_trace::sorting::bubble_sort;
    use proptest::prelude::*;

    fn controller(values: &[i64]) -> PlaybackController {
        PlaybackController::new(Arc::new(bubble_sort(values)), SpeedDial::DEFAULT)
    }

    fn epoch(controller: &PlaybackController) -> TimerEpoch {
        controller.timer().map(|t| t.epoch).unwrap()
    }

    #[test]
    fn test_step_forward_to_completion_then_reset() {
        let mut c = controller(&[5, 3, 1, 4, 2]);
        assert_eq!(c.status(), PlaybackStatus::Idle);
        for _ in 0..c.len() {
            c.step_forward();
        }
        assert_eq!(c.current_index(), 10);
        assert_eq!(c.status(), PlaybackStatus::Completed);
        assert!(c.timer().is_none());

        c.step_forward();
        assert_eq!(c.current_index(), 10);

        c.reset();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_play_pause_cycle() {
        let mut c = controller(&[3, 2, 1]);
        c.play();
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert_eq!(c.timer().unwrap().period, Duration::from_millis(550));

        let e = epoch(&c);
        assert_eq!(c.tick(e), TickOutcome::Advanced(1));
        c.pause();
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert!(c.timer().is_none());
        assert_eq!(c.tick(e), TickOutcome::Stale);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_ticks_run_to_completion() {
        let mut c = controller(&[3, 2, 1]);
        c.play();
        let e = epoch(&c);
        assert_eq!(c.tick(e), TickOutcome::Advanced(1));
        assert_eq!(c.tick(e), TickOutcome::Advanced(2));
        assert_eq!(c.tick(e), TickOutcome::Completed(3));
        assert_eq!(c.status(), PlaybackStatus::Completed);
        assert_eq!(c.tick(e), TickOutcome::Stale);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_play_is_noop_when_playing_or_completed() {
        let mut c = controller(&[2, 1]);
        c.play();
        let first = epoch(&c);
        c.play();
        assert_eq!(epoch(&c), first);

        c.pause();
        c.seek(c.len());
        assert_eq!(c.status(), PlaybackStatus::Completed);
        c.play();
        assert_eq!(c.status(), PlaybackStatus::Completed);
        assert!(c.timer().is_none());
    }

    #[test]
    fn test_manual_steps_ignored_while_playing() {
        let mut c = controller(&[3, 2, 1]);
        c.play();
        c.step_forward();
        c.step_backward();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_zombie_tick_after_retrace() {
        let mut c = controller(&[3, 2, 1]);
        c.play();
        let old = epoch(&c);
        c.retrace(Arc::new(bubble_sort(&[9, 8, 7, 6])));
        assert_eq!(c.tick(old), TickOutcome::Stale);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.status(), PlaybackStatus::Idle);

        c.play();
        assert_ne!(epoch(&c), old);
    }

    #[test]
    fn test_set_speed_restarts_timer_only_when_playing() {
        let mut c = controller(&[3, 2, 1]);
        c.set_speed(SpeedDial::MAX);
        assert!(c.timer().is_none());

        c.play();
        let before = epoch(&c);
        c.set_speed(SpeedDial::new(10));
        let timer = c.timer().unwrap();
        assert_ne!(timer.epoch, before);
        assert_eq!(timer.period, Duration::from_millis(910));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.tick(before), TickOutcome::Stale);
    }

    #[test]
    fn test_empty_trace() {
        let mut c = PlaybackController::new(Arc::new(Trace::empty(Algorithm::LinearSearch)), SpeedDial::DEFAULT);
        assert_eq!(c.status(), PlaybackStatus::Completed);
        c.play();
        c.step_forward();
        c.seek(3);
        assert_eq!(c.status(), PlaybackStatus::Completed);
        assert!(c.timer().is_none());
        assert_eq!(c.current_index(), 0);

        c.reset();
        assert_eq!(c.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_seek_pauses_and_clamps() {
        let mut c = PlaybackController::new(
            Arc::new(binary_search(&[1, 3, 5, 7, 9], 1)),
            SpeedDial::DEFAULT,
        );
        c.play();
        c.seek(99);
        assert_eq!(c.current_index(), c.len());
        assert_eq!(c.status(), PlaybackStatus::Completed);
        assert!(c.timer().is_none());

        c.seek(0);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        c.step_backward();
        assert_eq!(c.current_index(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Play,
        Pause,
        Tick,
        Forward,
        Backward,
        Reset,
        Speed(i64),
        Seek(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Play),
            Just(Op::Pause),
            Just(Op::Tick),
            Just(Op::Forward),
            Just(Op::Backward),
            Just(Op::Reset),
            (1i64..=100).prop_map(Op::Speed),
            (0usize..20).prop_map(Op::Seek),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(values in prop::collection::vec(-50i64..50, 0..7), ops in prop::collection::vec(op(), 0..60)) {
            let mut c = controller(&values);
            for op in ops {
                let before = c.current_index();
                match op {
                    Op::Play => c.play(),
                    Op::Pause => c.pause(),
                    Op::Tick => {
                        if let Some(timer) = c.timer() {
                            let outcome = c.tick(timer.epoch);
                            prop_assert_ne!(outcome, TickOutcome::Stale);
                            prop_assert_eq!(c.current_index(), before + 1);
                        }
                    }
                    Op::Forward => c.step_forward(),
                    Op::Backward => c.step_backward(),
                    Op::Reset => c.reset(),
                    Op::Speed(dial) => c.set_speed(SpeedDial::new(dial)),
                    Op::Seek(i) => c.seek(i),
                }
                prop_assert!(c.current_index() <= c.len());
                prop_assert_eq!(c.timer().is_some(), c.status() == PlaybackStatus::Playing);
                if c.status() == PlaybackStatus::Completed {
                    prop_assert!(c.current_index() == c.len());
                }
            }
        }
    }
}
