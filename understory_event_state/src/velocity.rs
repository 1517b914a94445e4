// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation from timestamped position samples.
//!
//! [`VelocityTracker`] keeps the samples that fall inside a short trailing
//! window (100 ms by default) and reports the average velocity across that
//! window in units per second. A pointer that stopped before release reports
//! zero velocity once its last movement ages out of the window.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! tracker.push(Point::new(0.0, 0.0), 1_000);
//! tracker.push(Point::new(-30.0, 0.0), 1_050);
//! // 30 units in 50 ms is 600 units per second.
//! assert_eq!(tracker.velocity(), Vec2::new(-600.0, 0.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Default trailing window used for velocity estimation, in milliseconds.
pub const DEFAULT_WINDOW_MS: u64 = 100;

const MAX_SAMPLES: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sample {
    pos: Point,
    time: u64,
}

/// Estimates velocity from recent pointer samples.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
    window_ms: u64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Creates a tracker with the default 100 ms window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_MS)
    }

    /// Creates a tracker with a custom trailing window.
    ///
    /// A zero window is bumped to one millisecond.
    #[must_use]
    pub fn with_window(window_ms: u64) -> Self {
        Self {
            samples: SmallVec::new(),
            window_ms: window_ms.max(1),
        }
    }

    /// Returns the trailing window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Records a position at `time_ms`.
    ///
    /// A timestamp earlier than the previous sample restarts tracking.
    pub fn push(&mut self, pos: Point, time_ms: u64) {
        if self.samples.last().is_some_and(|s| time_ms < s.time) {
            self.samples.clear();
        }
        self.prune(time_ms);
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(Sample { pos, time: time_ms });
    }

    /// Average velocity across the retained samples, in units per second.
    ///
    /// Returns [`Vec2::ZERO`] with fewer than two samples or no elapsed time.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Vec2::ZERO;
        };
        let dt = last.time - first.time;
        if dt == 0 {
            return Vec2::ZERO;
        }
        (last.pos - first.pos) * (1000.0 / dt as f64)
    }

    /// Velocity as seen at `now_ms`.
    ///
    /// If the most recent sample is older than the window, the pointer is
    /// considered at rest and this returns [`Vec2::ZERO`].
    #[must_use]
    pub fn velocity_at(&self, now_ms: u64) -> Vec2 {
        match self.samples.last() {
            Some(last) if now_ms.saturating_sub(last.time) <= self.window_ms => self.velocity(),
            _ => Vec2::ZERO,
        }
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn prune(&mut self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        let stale = self.samples.iter().take_while(|s| s.time < cutoff).count();
        if stale > 0 {
            self.samples.drain(..stale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_has_no_velocity() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(5.0, 5.0), 10);
        assert_eq!(t.velocity(), Vec2::ZERO);
    }

    #[test]
    fn same_timestamp_has_no_velocity() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(0.0, 0.0), 10);
        t.push(Point::new(50.0, 0.0), 10);
        assert_eq!(t.velocity(), Vec2::ZERO);
    }

    #[test]
    fn averages_over_window() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(0.0, 0.0), 0);
        t.push(Point::new(0.0, 10.0), 20);
        t.push(Point::new(0.0, 40.0), 80);
        assert_eq!(t.velocity(), Vec2::new(0.0, 500.0));
    }

    #[test]
    fn old_samples_fall_out_of_window() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(0.0, 0.0), 0);
        t.push(Point::new(100.0, 0.0), 50);
        // Slow tail: only the last two samples are within 100 ms.
        t.push(Point::new(101.0, 0.0), 200);
        t.push(Point::new(102.0, 0.0), 300);
        assert_eq!(t.len(), 2);
        assert_eq!(t.velocity(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn resting_pointer_reports_zero_at_release() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(0.0, 0.0), 0);
        t.push(Point::new(-60.0, 0.0), 40);
        assert_eq!(t.velocity_at(100), Vec2::new(-1500.0, 0.0));
        assert_eq!(t.velocity_at(500), Vec2::ZERO);
    }

    #[test]
    fn clock_going_backwards_restarts() {
        let mut t = VelocityTracker::new();
        t.push(Point::new(0.0, 0.0), 100);
        t.push(Point::new(10.0, 0.0), 110);
        t.push(Point::new(20.0, 0.0), 50);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut t = VelocityTracker::with_window(10_000);
        for i in 0..40_u32 {
            t.push(Point::new(f64::from(i), 0.0), u64::from(i));
        }
        assert_eq!(t.len(), MAX_SAMPLES);
        assert_eq!(t.velocity(), Vec2::new(1000.0, 0.0));
    }
}
