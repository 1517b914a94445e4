// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: compute movement deltas, total offsets, and release velocity.
//!
//! ## Usage
//!
//! 1) Start a drag operation by calling [`DragState::start`] with the initial position and time.
//! 2) On each move event, call [`DragState::update`] to get the movement delta since the last update.
//! 3) Optionally call [`DragState::total_offset`] to get the cumulative offset from the start position.
//! 4) On release, call [`DragState::finish`] to get the total translation and release velocity
//!    and reset state, or [`DragState::end`] to abandon the drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start dragging at (10, 20)
//! drag.start(Point::new(10.0, 20.0), 0);
//! assert!(drag.is_dragging());
//!
//! // Move to (15, 25) - delta is (5, 5)
//! let delta = drag.update(Point::new(15.0, 25.0), 10).unwrap();
//! assert_eq!(delta, Vec2::new(5.0, 5.0));
//!
//! // Release at (20, 30): total offset (10, 10) over 20 ms
//! let release = drag.finish(Point::new(20.0, 30.0), 20).unwrap();
//! assert_eq!(release.translation, Vec2::new(10.0, 10.0));
//! assert_eq!(release.velocity, Vec2::new(500.0, 500.0));
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

use crate::velocity::VelocityTracker;

/// Tracks drag state for move event processing
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Start position of the drag operation
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag
    pub last_pos: Option<Point>,
    velocity: VelocityTracker,
}

/// Summary of a completed drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragRelease {
    /// Offset from the start position to the release position.
    pub translation: Vec2,
    /// Release velocity in units per second.
    pub velocity: Vec2,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(&mut self, pos: Point, time_ms: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.velocity.clear();
        self.velocity.push(pos, time_ms);
    }

    /// Update the drag state with a new position, returning the movement delta since last update.
    pub fn update(&mut self, pos: Point, time_ms: u64) -> Option<Vec2> {
        self.start_pos?;
        self.velocity.push(pos, time_ms);
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Release velocity estimated from recent samples, in units per second.
    ///
    /// Returns `None` when no drag is active.
    pub fn release_velocity(&self, time_ms: u64) -> Option<Vec2> {
        self.start_pos?;
        Some(self.velocity.velocity_at(time_ms))
    }

    /// Complete the drag at `pos`, returning the total translation and
    /// release velocity, and reset state.
    pub fn finish(&mut self, pos: Point, time_ms: u64) -> Option<DragRelease> {
        self.update(pos, time_ms)?;
        let release = DragRelease {
            translation: self.total_offset(pos)?,
            velocity: self.velocity.velocity_at(time_ms),
        };
        self.end();
        Some(release)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.velocity.clear();
    }

    /// Returns `true` while a drag operation is active
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_is_not_dragging() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn update_returns_delta_when_dragging() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0), 0);

        let new_pos = Point::new(15.0, 25.0);
        let delta = drag.update(new_pos, 16);

        assert_eq!(delta, Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.last_pos, Some(new_pos));
    }

    #[test]
    fn update_returns_none_when_not_dragging() {
        let mut drag = DragState::default();

        assert_eq!(drag.update(Point::new(15.0, 25.0), 0), None);
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.release_velocity(0), None);
    }

    #[test]
    fn multiple_updates_track_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO, 0);

        assert_eq!(drag.update(Point::new(5.0, 3.0), 8), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0), 16), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(
            drag.total_offset(Point::new(8.0, 7.0)),
            Some(Vec2::new(8.0, 7.0))
        );
    }

    #[test]
    fn finish_reports_translation_and_velocity() {
        let mut drag = DragState::default();
        drag.start(Point::new(200.0, 50.0), 1_000);
        drag.update(Point::new(170.0, 50.0), 1_030);

        let release = drag.finish(Point::new(80.0, 50.0), 1_060).unwrap();

        assert_eq!(release.translation, Vec2::new(-120.0, 0.0));
        assert_eq!(release.velocity, Vec2::new(-2000.0, 0.0));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn finish_without_start_is_none() {
        let mut drag = DragState::default();
        assert_eq!(drag.finish(Point::ZERO, 0), None);
    }

    #[test]
    fn slow_release_has_no_velocity() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO, 0);
        drag.update(Point::new(0.0, 60.0), 40);

        assert_eq!(drag.release_velocity(1_000), Some(Vec2::ZERO));
    }

    #[test]
    fn start_overwrites_previous_drag() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO, 0);
        drag.update(Point::new(10.0, 10.0), 10);

        let new_start = Point::new(50.0, 60.0);
        drag.start(new_start, 500);

        assert_eq!(drag.start_pos, Some(new_start));
        assert_eq!(drag.start_pos, drag.last_pos);
        assert_eq!(drag.release_velocity(500), Some(Vec2::ZERO));
    }
}
