//! Mapping from dial gestures to a remaining time.
//!
//! A full turn (2π) spans the whole dial range. Angles are measured so that
//! 0 points at 12 o'clock; the usable single-turn range is `[-π/2, 3π/2]`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

/// Lower edge of the single-turn angle range.
pub const MIN_ANGLE: f64 = -FRAC_PI_2;
/// Upper edge of the single-turn angle range.
pub const MAX_ANGLE: f64 = 3.0 * FRAC_PI_2;

/// Reference point captured on the first change event of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub angle: f64,
    pub remaining: Duration,
}

/// Result of mapping one drag position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialUpdate {
    /// The drag moved the value to a point inside the range.
    Set(Duration),
    /// The drag hit `0` or the full range and was pinned there.
    Boundary(Duration),
}

impl DialUpdate {
    pub fn value(self) -> Duration {
        match self {
            DialUpdate::Set(value) | DialUpdate::Boundary(value) => value,
        }
    }
}

/// Angle of a pointer offset from the dial centre (`dx`, `dy` in screen
/// coordinates, y pointing down).
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    dx.atan2(dy) + FRAC_PI_2
}

/// Map a pointer angle to a new remaining time, relative to `anchor`.
pub fn map_drag(anchor: &DragAnchor, angle: f64, total: Duration) -> DialUpdate {
    let candidate = remaining_at(anchor, angle, total);

    if candidate <= 0.0 {
        DialUpdate::Boundary(Duration::ZERO)
    } else if candidate >= total.as_secs_f64() {
        DialUpdate::Boundary(total)
    } else {
        // Recompute from the clamped angle so the value never jumps when the
        // pointer crosses the dial's start/end mark.
        let clamped = remaining_at(anchor, angle.clamp(MIN_ANGLE, MAX_ANGLE), total);
        let secs = clamped.clamp(0.0, total.as_secs_f64());
        DialUpdate::Set(Duration::try_from_secs_f64(secs).unwrap_or(total))
    }
}

fn remaining_at(anchor: &DragAnchor, angle: f64, total: Duration) -> f64 {
    let delta = anchor.angle - angle;
    anchor.remaining.as_secs_f64() + total.as_secs_f64() * delta / TAU
}

/// Fraction of the dial covered by `remaining`, in `[0, 1]`.
pub fn progress(remaining: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// End angle (in the renderer's convention, 0 at 3 o'clock) of the sector
/// showing `remaining`. The sector always starts at `-π/2`.
pub fn sector_end_angle(remaining: Duration, total: Duration) -> f64 {
    2.0 * PI * progress(remaining, total) - FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: Duration = Duration::from_secs(3600);

    fn anchor(angle: f64, secs: u64) -> DragAnchor {
        DragAnchor {
            angle,
            remaining: Duration::from_secs(secs),
        }
    }

    fn assert_secs(actual: Duration, expected: f64) {
        assert!(
            (actual.as_secs_f64() - expected).abs() < 1e-6,
            "expected {expected}s, got {actual:?}"
        );
    }

    #[test]
    fn pointer_angle_points_up_at_twelve() {
        // Straight up on screen is negative dy.
        assert!((pointer_angle(0.0, -1.0) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((pointer_angle(1.0, 0.0) - PI).abs() < 1e-12);
        assert!((pointer_angle(0.0, 1.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((pointer_angle(-1.0, 0.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn pointer_angle_stays_in_single_turn_range() {
        for (dx, dy) in [(1.0, 1.0), (-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1e-9)] {
            let angle = pointer_angle(dx, dy);
            assert!((MIN_ANGLE..=MAX_ANGLE).contains(&angle), "{angle}");
        }
    }

    #[test]
    fn half_turn_adds_half_the_range() {
        let update = map_drag(&anchor(PI, 1500), 0.0, TOTAL);
        assert!(matches!(update, DialUpdate::Set(_)));
        assert_secs(update.value(), 3300.0);
    }

    #[test]
    fn turning_back_removes_time() {
        let update = map_drag(&anchor(0.0, 1500), FRAC_PI_2, TOTAL);
        assert_secs(update.value(), 600.0);
    }

    #[test]
    fn undershoot_pins_to_zero() {
        // 100s - 300s would be -200s.
        let angle = 300.0 / 3600.0 * TAU;
        let update = map_drag(&anchor(0.0, 100), angle, TOTAL);
        assert_eq!(update, DialUpdate::Boundary(Duration::ZERO));
    }

    #[test]
    fn overshoot_pins_to_total() {
        // 3500s + 500s would be 4000s.
        let angle = PI - 500.0 / 3600.0 * TAU;
        let update = map_drag(&anchor(PI, 3500), angle, TOTAL);
        assert_eq!(update, DialUpdate::Boundary(TOTAL));
    }

    #[test]
    fn out_of_range_angle_is_clamped_before_mapping() {
        // Raw angle is past the dial end; the clamped angle (3π/2) is used.
        let update = map_drag(&anchor(PI, 1800), 1.6 * PI, TOTAL);
        assert!(matches!(update, DialUpdate::Set(_)));
        assert_secs(update.value(), 1800.0 - 3600.0 * FRAC_PI_2 / TAU);
    }

    #[test]
    fn clamped_angle_never_leaves_range() {
        // Anchor itself sits outside the range, so clamping the pointer
        // would push the value past zero.
        let update = map_drag(&anchor(-PI, 100), -0.99 * PI, TOTAL);
        assert_eq!(update.value(), Duration::ZERO);
    }

    #[test]
    fn sector_covers_remaining_fraction() {
        assert!((sector_end_angle(Duration::ZERO, TOTAL) + FRAC_PI_2).abs() < 1e-12);
        assert!((sector_end_angle(Duration::from_secs(900), TOTAL) - 0.0).abs() < 1e-12);
        assert!((sector_end_angle(TOTAL, TOTAL) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert_eq!(progress(Duration::from_secs(10), Duration::ZERO), 0.0);
    }
}
