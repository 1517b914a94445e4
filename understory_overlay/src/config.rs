// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-presentation overlay configuration.

use core::time::Duration;

use kurbo::Size;
use understory_placement::{ArrowAlignment, LayoutDirection, Side};

use crate::gesture::DragThresholds;

/// How an overlay may be dismissed without an explicit call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DismissPolicy {
    /// Dismiss when the user taps outside the overlay.
    pub dismiss_on_outside_tap: bool,
    /// Dismiss automatically this long after the overlay is fully presented.
    pub auto_dismiss: Option<Duration>,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self {
            dismiss_on_outside_tap: true,
            auto_dismiss: None,
        }
    }
}

impl DismissPolicy {
    /// Returns `true` if an auto-dismiss delay is configured.
    #[must_use]
    pub fn auto_dismiss_enabled(&self) -> bool {
        self.auto_dismiss.is_some()
    }
}

/// Animation durations for the entry and exit phases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotionTimings {
    /// Entry duration.
    pub entry: Duration,
    /// Exit duration.
    pub exit: Duration,
    /// Entry duration when the user prefers reduced motion.
    pub reduced_entry: Duration,
    /// Exit duration when the user prefers reduced motion.
    pub reduced_exit: Duration,
}

impl Default for MotionTimings {
    fn default() -> Self {
        Self {
            entry: Duration::from_millis(300),
            exit: Duration::from_millis(200),
            reduced_entry: Duration::from_millis(120),
            reduced_exit: Duration::from_millis(120),
        }
    }
}

impl MotionTimings {
    /// Entry duration for the given motion preference.
    #[must_use]
    pub fn entry_duration(&self, reduced_motion: bool) -> Duration {
        if reduced_motion {
            self.reduced_entry
        } else {
            self.entry
        }
    }

    /// Exit duration for the given motion preference.
    #[must_use]
    pub fn exit_duration(&self, reduced_motion: bool) -> Duration {
        if reduced_motion {
            self.reduced_exit
        } else {
            self.exit
        }
    }
}

/// Immutable configuration for one presentation.
///
/// Built with the `with_*` methods, each of which consumes the value and
/// returns a new one. `S` carries opaque style tokens (colors, radii,
/// shadows) that the engine stores and hands back untouched.
///
/// ```
/// use core::time::Duration;
/// use understory_overlay::OverlayConfiguration;
/// use understory_placement::Side;
///
/// let config = OverlayConfiguration::new()
///     .with_side(Side::Top)
///     .with_gap(4.0)
///     .with_auto_dismiss(Duration::from_secs(2));
/// assert_eq!(config.side(), Side::Top);
/// assert!(config.dismiss().auto_dismiss_enabled());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfiguration<S = ()> {
    side: Side,
    layout_direction: LayoutDirection,
    arrow_alignment: ArrowAlignment,
    arrow_inset: f64,
    gap: f64,
    padding: f64,
    max_width: Option<f64>,
    max_height: Option<f64>,
    dismiss: DismissPolicy,
    backdrop_opacity: f64,
    drag_to_dismiss: bool,
    drag: DragThresholds,
    motion: MotionTimings,
    style: S,
}

impl<S: Default> Default for OverlayConfiguration<S> {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            layout_direction: LayoutDirection::LeftToRight,
            arrow_alignment: ArrowAlignment::Center,
            arrow_inset: 12.0,
            gap: 6.0,
            padding: 8.0,
            max_width: None,
            max_height: None,
            dismiss: DismissPolicy::default(),
            backdrop_opacity: 0.0,
            drag_to_dismiss: false,
            drag: DragThresholds::default(),
            motion: MotionTimings::default(),
            style: S::default(),
        }
    }
}

impl OverlayConfiguration {
    /// Creates a configuration with default values and no style tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> OverlayConfiguration<S> {
    /// Preferred side of the anchor.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Direction used to resolve leading/trailing.
    #[must_use]
    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    /// Arrow alignment along the cross axis.
    #[must_use]
    pub fn arrow_alignment(&self) -> ArrowAlignment {
        self.arrow_alignment
    }

    /// Minimum distance between the arrow and the overlay's cross-axis edges.
    #[must_use]
    pub fn arrow_inset(&self) -> f64 {
        self.arrow_inset
    }

    /// Distance between anchor and overlay.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Minimum distance between the overlay and the container edges.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Maximum overlay width, if any.
    #[must_use]
    pub fn max_width(&self) -> Option<f64> {
        self.max_width
    }

    /// Maximum overlay height, if any.
    #[must_use]
    pub fn max_height(&self) -> Option<f64> {
        self.max_height
    }

    /// Dismiss policy.
    #[must_use]
    pub fn dismiss(&self) -> DismissPolicy {
        self.dismiss
    }

    /// Opacity of the backdrop while the overlay is shown.
    #[must_use]
    pub fn backdrop_opacity(&self) -> f64 {
        self.backdrop_opacity
    }

    /// Whether dragging the overlay can dismiss it.
    #[must_use]
    pub fn drag_to_dismiss(&self) -> bool {
        self.drag_to_dismiss
    }

    /// Drag-to-dismiss thresholds.
    #[must_use]
    pub fn drag_thresholds(&self) -> DragThresholds {
        self.drag
    }

    /// Animation durations.
    #[must_use]
    pub fn motion(&self) -> MotionTimings {
        self.motion
    }

    /// Opaque style tokens.
    #[must_use]
    pub fn style(&self) -> &S {
        &self.style
    }

    /// Clamps a measured overlay size to the configured maximums.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            self.max_width.map_or(size.width, |m| size.width.min(m)),
            self.max_height.map_or(size.height, |m| size.height.min(m)),
        )
    }

    /// Returns a copy placed on `side`.
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Returns a copy using `direction` for leading/trailing.
    #[must_use]
    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Returns a copy with the given arrow alignment.
    #[must_use]
    pub fn with_arrow_alignment(mut self, alignment: ArrowAlignment) -> Self {
        self.arrow_alignment = alignment;
        self
    }

    /// Returns a copy with the given arrow inset.
    #[must_use]
    pub fn with_arrow_inset(mut self, inset: f64) -> Self {
        self.arrow_inset = inset;
        self
    }

    /// Returns a copy with the given gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Returns a copy with the given container padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Returns a copy with a maximum width.
    #[must_use]
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Returns a copy with a maximum height.
    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Returns a copy that does or does not dismiss on outside taps.
    #[must_use]
    pub fn with_dismiss_on_outside_tap(mut self, enabled: bool) -> Self {
        self.dismiss.dismiss_on_outside_tap = enabled;
        self
    }

    /// Returns a copy that dismisses itself `delay` after being presented.
    #[must_use]
    pub fn with_auto_dismiss(mut self, delay: Duration) -> Self {
        self.dismiss.auto_dismiss = Some(delay);
        self
    }

    /// Returns a copy without auto-dismiss.
    #[must_use]
    pub fn without_auto_dismiss(mut self) -> Self {
        self.dismiss.auto_dismiss = None;
        self
    }

    /// Returns a copy with the given backdrop opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_backdrop_opacity(mut self, opacity: f64) -> Self {
        self.backdrop_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Returns a copy that does or does not allow drag-to-dismiss.
    #[must_use]
    pub fn with_drag_to_dismiss(mut self, enabled: bool) -> Self {
        self.drag_to_dismiss = enabled;
        self
    }

    /// Returns a copy with the given drag thresholds.
    #[must_use]
    pub fn with_drag_thresholds(mut self, thresholds: DragThresholds) -> Self {
        self.drag = thresholds;
        self
    }

    /// Returns a copy with the given animation durations.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionTimings) -> Self {
        self.motion = motion;
        self
    }

    /// Returns a copy carrying different style tokens.
    #[must_use]
    pub fn with_style<T>(self, style: T) -> OverlayConfiguration<T> {
        OverlayConfiguration {
            side: self.side,
            layout_direction: self.layout_direction,
            arrow_alignment: self.arrow_alignment,
            arrow_inset: self.arrow_inset,
            gap: self.gap,
            padding: self.padding,
            max_width: self.max_width,
            max_height: self.max_height,
            dismiss: self.dismiss,
            backdrop_opacity: self.backdrop_opacity,
            drag_to_dismiss: self.drag_to_dismiss,
            drag: self.drag,
            motion: self.motion,
            style,
        }
    }
}
