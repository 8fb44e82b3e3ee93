//! Countdown state machine for a single Pomodoro session.
//!
//! The remaining time is always recomputed from a wall-clock deadline, never
//! decremented per tick, so late or missed ticks cannot make it drift.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// `H` is the handle of the recurring tick source. It only exists while the
/// countdown is running; dropping it cancels the ticks.
#[derive(Debug)]
pub enum Countdown<H> {
    Idle,
    Running {
        deadline: DateTime<Utc>,
        _ticks: H,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was idle; nothing changed.
    Ignored,
    /// Still running with this much time left.
    Running(Duration),
    /// Reached zero and went back to idle.
    Expired,
}

impl<H> Countdown<H> {
    pub fn is_running(&self) -> bool {
        matches!(self, Countdown::Running { .. })
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self {
            Countdown::Idle => None,
            Countdown::Running { deadline, .. } => Some(*deadline),
        }
    }

    /// Start counting `remaining` down from `now`. `schedule` is only called
    /// when a transition actually happens. Returns whether it did.
    pub fn start(
        &mut self,
        remaining: Duration,
        now: DateTime<Utc>,
        schedule: impl FnOnce() -> H,
    ) -> bool {
        if self.is_running() {
            return false;
        }

        let deadline = TimeDelta::from_std(remaining)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        debug!(%deadline, remaining_secs = remaining.as_secs_f64(), "countdown started");
        *self = Countdown::Running {
            deadline,
            _ticks: schedule(),
        };
        true
    }

    /// Recompute `remaining` from the deadline.
    pub fn tick(&mut self, remaining: &mut Duration, now: DateTime<Utc>) -> TickOutcome {
        let Countdown::Running { deadline, .. } = self else {
            return TickOutcome::Ignored;
        };

        // A negative difference means the tick arrived after the deadline.
        *remaining = (*deadline - now).to_std().unwrap_or(Duration::ZERO);

        if remaining.is_zero() {
            debug!("countdown expired");
            *self = Countdown::Idle;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(*remaining)
        }
    }

    /// Stop the countdown. The caller's remaining time stays frozen at
    /// whatever the last tick produced. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        debug!("countdown paused");
        *self = Countdown::Idle;
        true
    }
}
