//! The single timer session behind the dial.
//!
//! All operations must be called from one thread of control, in order. The
//! session keeps `0 <= remaining <= total` at all times.

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::dial::{self, DialUpdate, DragAnchor};
use crate::feedback::Feedback;
use crate::ticker::TickSource;
use crate::timer::{Countdown, TickOutcome};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the host needs to draw the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub remaining: Duration,
    pub total: Duration,
    pub running: bool,
}

impl Snapshot {
    pub fn progress(&self) -> f64 {
        dial::progress(self.remaining, self.total)
    }

    pub fn sector_end_angle(&self) -> f64 {
        dial::sector_end_angle(self.remaining, self.total)
    }
}

pub struct TimerSession<F, T: TickSource> {
    total: Duration,
    remaining: Duration,
    drag: Option<DragAnchor>,
    countdown: Countdown<T::Handle>,
    tick_period: Duration,
    feedback: F,
    ticks: T,
}

impl<F: Feedback, T: TickSource> TimerSession<F, T> {
    pub fn new(total: Duration, remaining: Duration, feedback: F, ticks: T) -> Self {
        Self {
            total,
            remaining: remaining.min(total),
            drag: None,
            countdown: Countdown::Idle,
            tick_period: DEFAULT_TICK_PERIOD,
            feedback,
            ticks,
        }
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            remaining: self.remaining,
            total: self.total,
            running: self.is_running(),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.countdown.deadline()
    }

    /// Pointer moved to `angle` (see [`dial::pointer_angle`]) during a drag.
    ///
    /// While running the dial is locked: nothing changes and the host gets a
    /// boundary notification asking the user to pause first.
    pub fn on_drag_changed(&mut self, angle: f64) {
        if self.is_running() {
            debug!("drag refused while running");
            self.feedback.notify_boundary();
            return;
        }

        if !angle.is_finite() {
            trace!(angle, "ignoring non-finite drag angle");
            return;
        }

        let remaining = self.remaining;
        let anchor = *self.drag.get_or_insert(DragAnchor { angle, remaining });

        match dial::map_drag(&anchor, angle, self.total) {
            DialUpdate::Set(value) => self.remaining = value,
            DialUpdate::Boundary(value) => {
                self.remaining = value;
                self.feedback.notify_boundary();
            }
        }
        trace!(angle, remaining_secs = self.remaining.as_secs_f64(), "dial moved");
    }

    pub fn on_drag_ended(&mut self) {
        self.drag = None;
    }

    /// Start counting down from `now`. No-op when already running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        let Self {
            countdown,
            ticks,
            tick_period,
            remaining,
            ..
        } = self;
        countdown.start(*remaining, now, || ticks.schedule(*tick_period));
    }

    /// Stop counting down, keeping the current remaining time. No-op when idle.
    pub fn pause(&mut self) {
        self.countdown.pause();
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        self.countdown.tick(&mut self.remaining, now)
    }

    /// Turn the dial by `radians` (positive adds time) as a series of drag
    /// gestures from the middle of the dial's range. Each gesture covers at
    /// most half a turn so the pointer never leaves `[-π/2, 3π/2]`.
    pub fn turn_by(&mut self, radians: f64) {
        if self.is_running() {
            debug!("turn refused while running");
            self.feedback.notify_boundary();
            return;
        }
        if !radians.is_finite() {
            return;
        }

        let mut left = radians;
        while left != 0.0 {
            let step = left.clamp(-PI, PI);
            self.on_drag_changed(FRAC_PI_2);
            self.on_drag_changed(FRAC_PI_2 - step);
            self.on_drag_ended();
            left -= step;

            if self.remaining.is_zero() || self.remaining == self.total {
                break;
            }
        }
    }

    /// The centre button: pause when running, start otherwise.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }
    }
}
