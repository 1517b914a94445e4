// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-dismiss: damped drag offsets and the dismiss/snap-back decision.
//!
//! A [`DragDismissController`] works on a single axis with a parameterized
//! [`DismissDirection`], so a leading-anchored sidebar (dismissed by dragging
//! towards negative x) and a trailing-anchored one (positive x) share one
//! implementation.
//!
//! ```
//! use understory_overlay::gesture::{
//!     DismissDirection, DragDismissController, DragOutcome, DragThresholds,
//! };
//! use understory_placement::Axis;
//!
//! let drag = DragDismissController::new(
//!     DragThresholds::default(),
//!     DismissDirection::Negative,
//!     Axis::Horizontal,
//! );
//!
//! // Dragging the wrong way meets 70% resistance.
//! assert_eq!(drag.damped_offset(50.0), 15.0);
//! assert_eq!(drag.damped_offset(-50.0), -50.0);
//!
//! assert_eq!(drag.release(-120.0, 0.0), DragOutcome::Dismiss);
//! assert_eq!(drag.release(-60.0, -400.0), DragOutcome::SnapBack);
//! ```

use core::fmt;

use kurbo::{Point, Vec2};
use understory_event_state::drag::{DragRelease, DragState};
use understory_placement::{Axis, LayoutDirection, Side};

/// Distance, velocity, and resistance parameters for drag-to-dismiss.
///
/// The defaults were tuned for touch input; treat them as starting points for
/// other input devices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragThresholds {
    /// Translation in the dismiss direction beyond which release dismisses.
    pub dismiss_distance: f64,
    /// Release speed in the dismiss direction beyond which release dismisses,
    /// in units per second.
    pub dismiss_velocity: f64,
    /// Fraction of the translation applied when dragging against the dismiss
    /// direction.
    pub resistance: f64,
}

impl DragThresholds {
    /// Default distance threshold.
    pub const DEFAULT_DISTANCE: f64 = 100.0;
    /// Default velocity threshold.
    pub const DEFAULT_VELOCITY: f64 = 500.0;
    /// Default resistance factor.
    pub const DEFAULT_RESISTANCE: f64 = 0.3;

    /// Creates validated thresholds.
    ///
    /// Distances and velocities must be finite and non-negative; resistance
    /// must lie in `[0, 1]`.
    pub fn new(
        dismiss_distance: f64,
        dismiss_velocity: f64,
        resistance: f64,
    ) -> Result<Self, ThresholdError> {
        if !(dismiss_distance.is_finite() && dismiss_distance >= 0.0) {
            return Err(ThresholdError::Distance(dismiss_distance));
        }
        if !(dismiss_velocity.is_finite() && dismiss_velocity >= 0.0) {
            return Err(ThresholdError::Velocity(dismiss_velocity));
        }
        if !(0.0..=1.0).contains(&resistance) {
            return Err(ThresholdError::Resistance(resistance));
        }
        Ok(Self {
            dismiss_distance,
            dismiss_velocity,
            resistance,
        })
    }
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            dismiss_distance: Self::DEFAULT_DISTANCE,
            dismiss_velocity: Self::DEFAULT_VELOCITY,
            resistance: Self::DEFAULT_RESISTANCE,
        }
    }
}

/// Error returned by [`DragThresholds::new`] for an out-of-range parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ThresholdError {
    /// The distance threshold was negative or not finite.
    Distance(f64),
    /// The velocity threshold was negative or not finite.
    Velocity(f64),
    /// The resistance factor was outside `[0, 1]`.
    Resistance(f64),
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance(v) => write!(f, "dismiss distance {v} must be finite and non-negative"),
            Self::Velocity(v) => write!(f, "dismiss velocity {v} must be finite and non-negative"),
            Self::Resistance(v) => write!(f, "drag resistance {v} must lie in [0, 1]"),
        }
    }
}

impl core::error::Error for ThresholdError {}

/// Sign of the drag direction that dismisses an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissDirection {
    /// Towards decreasing coordinates (up or left).
    Negative,
    /// Towards increasing coordinates (down or right).
    Positive,
}

impl DismissDirection {
    /// Dismiss by dragging away from the anchor, towards the side the
    /// overlay was placed on.
    #[must_use]
    pub fn for_side(side: Side, direction: LayoutDirection) -> Self {
        if side.away_sign(direction) < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `-1.0` or `1.0`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }
}

/// What to do when a drag is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragOutcome {
    /// The overlay should be dismissed.
    Dismiss,
    /// The drag offset should animate back to zero.
    SnapBack,
}

/// Interprets single-axis drags into damped offsets and dismiss decisions.
#[derive(Clone, Debug)]
pub struct DragDismissController {
    thresholds: DragThresholds,
    direction: DismissDirection,
    axis: Axis,
    drag: DragState,
}

impl DragDismissController {
    /// Creates a controller for drags along `axis`.
    #[must_use]
    pub fn new(thresholds: DragThresholds, direction: DismissDirection, axis: Axis) -> Self {
        Self {
            thresholds,
            direction,
            axis,
            drag: DragState::default(),
        }
    }

    /// Creates a controller for an overlay placed on `side` of its anchor.
    #[must_use]
    pub fn for_side(thresholds: DragThresholds, side: Side, direction: LayoutDirection) -> Self {
        Self::new(
            thresholds,
            DismissDirection::for_side(side, direction),
            side.main_axis(),
        )
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> DragThresholds {
        self.thresholds
    }

    /// Returns the dismiss direction.
    #[must_use]
    pub fn direction(&self) -> DismissDirection {
        self.direction
    }

    /// Returns the drag axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Offset to display for a raw `translation` along the axis.
    ///
    /// Full magnitude in the dismiss direction, scaled by the resistance
    /// factor in the opposite direction.
    #[must_use]
    pub fn damped_offset(&self, translation: f64) -> f64 {
        if translation * self.direction.sign() >= 0.0 {
            translation
        } else {
            translation * self.thresholds.resistance
        }
    }

    /// Decides between dismissing and snapping back.
    ///
    /// Dismisses if the translation exceeds the distance threshold in the
    /// dismiss direction, or the velocity exceeds the velocity threshold in the
    /// dismiss direction. Both comparisons are strict.
    #[must_use]
    pub fn release(&self, translation: f64, velocity: f64) -> DragOutcome {
        let sign = self.direction.sign();
        let far_enough = translation * sign > self.thresholds.dismiss_distance;
        let fast_enough = velocity * sign > self.thresholds.dismiss_velocity;
        if far_enough || fast_enough {
            DragOutcome::Dismiss
        } else {
            DragOutcome::SnapBack
        }
    }

    /// Projects a 2D vector onto the controller's axis.
    #[must_use]
    pub fn project(&self, v: Vec2) -> f64 {
        match self.axis {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    /// Decides the outcome of a release reported by [`DragState::finish`].
    #[must_use]
    pub fn release_drag(&self, release: DragRelease) -> DragOutcome {
        self.release(self.project(release.translation), self.project(release.velocity))
    }

    /// Pointer pressed at `pos`: begin tracking.
    pub fn pointer_down(&mut self, pos: Point, time_ms: u64) {
        self.drag.start(pos, time_ms);
    }

    /// Pointer moved: returns the damped offset to display, or `None` when
    /// no drag is active.
    pub fn pointer_move(&mut self, pos: Point, time_ms: u64) -> Option<f64> {
        self.drag.update(pos, time_ms)?;
        let total = self.drag.total_offset(pos)?;
        Some(self.damped_offset(self.project(total)))
    }

    /// Pointer released: returns the outcome, or `None` when no drag was active.
    pub fn pointer_up(&mut self, pos: Point, time_ms: u64) -> Option<DragOutcome> {
        self.drag.finish(pos, time_ms).map(|r| self.release_drag(r))
    }

    /// Abandons any drag in progress.
    pub fn cancel(&mut self) {
        self.drag.end();
    }

    /// Returns `true` while a pointer drag is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}
