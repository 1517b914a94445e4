// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow alignment along the overlay's cross axis.

use kurbo::Rect;

use crate::side::{Axis, Side};

/// Where the overlay's arrow sits along the cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ArrowAlignment {
    /// Point at the anchor's cross-axis midpoint.
    #[default]
    Center,
    /// Sit at the overlay's cross-axis start, one inset in.
    Start,
    /// Sit at the overlay's cross-axis end, one inset in.
    End,
    /// Offset from the overlay's cross-axis center by the given distance.
    Offset(f64),
}

/// Computes the arrow position along the overlay's cross axis.
///
/// The result is measured from the cross-axis start edge of `overlay_rect`
/// and clamped to `[inset, extent - inset]`, so the arrow never hangs past a
/// rounded corner. When the overlay is narrower than two insets, the arrow is
/// centered. A non-finite overlay extent yields `0.0`.
///
/// `Center` tracks the anchor rather than the overlay, so an overlay that was
/// pushed sideways by viewport clamping still points at its trigger.
#[must_use]
pub fn arrow_offset(
    anchor: Rect,
    overlay_rect: Rect,
    side: Side,
    alignment: ArrowAlignment,
    inset: f64,
) -> f64 {
    let anchor = anchor.abs();
    let overlay_rect = overlay_rect.abs();
    let (start, extent, anchor_mid) = match side.cross_axis() {
        Axis::Horizontal => (overlay_rect.x0, overlay_rect.width(), anchor.center().x),
        Axis::Vertical => (overlay_rect.y0, overlay_rect.height(), anchor.center().y),
    };
    if !extent.is_finite() {
        return 0.0;
    }
    let inset = inset.max(0.0);
    let raw = match alignment {
        ArrowAlignment::Center => anchor_mid - start,
        ArrowAlignment::Start => inset,
        ArrowAlignment::End => extent - inset,
        ArrowAlignment::Offset(n) => extent * 0.5 + n,
    };
    if extent < inset * 2.0 || !raw.is_finite() {
        return extent * 0.5;
    }
    raw.clamp(inset, extent - inset)
}
