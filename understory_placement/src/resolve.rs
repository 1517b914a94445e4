// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamped placement of an overlay next to its anchor.

use kurbo::{Point, Rect, Size};

use crate::side::{Edge, LayoutDirection, Side};

/// Inputs for a single placement computation.
///
/// All rectangles and sizes live in the same coordinate space as the
/// container, with the container's origin at `(0, 0)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// On-screen rectangle of the trigger element.
    pub anchor: Rect,
    /// Measured size of the overlay.
    pub overlay_size: Size,
    /// Preferred side of the anchor.
    pub side: Side,
    /// Direction used to resolve leading/trailing sides.
    pub direction: LayoutDirection,
    /// Distance between the anchor edge and the overlay along the main axis.
    pub gap: f64,
    /// Size of the container the overlay must stay inside.
    pub container_size: Size,
    /// Minimum distance kept between the overlay and the container edges.
    pub padding: f64,
}

/// The result of a placement computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Center of the overlay after clamping.
    pub center: Point,
    /// Bounding box of the overlay after clamping.
    pub rect: Rect,
    /// Physical anchor edge the overlay was placed against.
    pub edge: Edge,
}

impl PlacementRequest {
    /// Creates a request for a bottom-placed overlay with no gap or padding.
    #[must_use]
    pub fn new(anchor: Rect, overlay_size: Size, container_size: Size) -> Self {
        Self {
            anchor,
            overlay_size,
            side: Side::Bottom,
            direction: LayoutDirection::LeftToRight,
            gap: 0.0,
            container_size,
            padding: 0.0,
        }
    }

    /// Returns a copy with the given side.
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Returns a copy with the given layout direction.
    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
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

    /// Computes the clamped center point.
    #[must_use]
    pub fn resolve(&self) -> Point {
        let edge = self.side.edge(self.direction);
        let raw = raw_center(self.anchor.abs(), self.overlay_size, edge, self.gap);
        let half_w = self.overlay_size.width * 0.5;
        let half_h = self.overlay_size.height * 0.5;
        Point::new(
            clamp_axis(raw.x, half_w, self.container_size.width, self.padding),
            clamp_axis(raw.y, half_h, self.container_size.height, self.padding),
        )
    }

    /// Computes the clamped center point and the overlay's bounding box.
    #[must_use]
    pub fn place(&self) -> Placement {
        let center = self.resolve();
        Placement {
            center,
            rect: Rect::from_center_size(center, self.overlay_size),
            edge: self.side.edge(self.direction),
        }
    }
}

/// Resolves the clamped center point for an overlay placed on `side` of `anchor`.
///
/// Leading/trailing sides use [`LayoutDirection::LeftToRight`]; build a
/// [`PlacementRequest`] to use another direction.
///
/// This is a pure function: identical inputs always produce identical output.
#[must_use]
pub fn resolve(
    anchor: Rect,
    overlay_size: Size,
    side: Side,
    gap: f64,
    container_size: Size,
    padding: f64,
) -> Point {
    PlacementRequest {
        anchor,
        overlay_size,
        side,
        direction: LayoutDirection::LeftToRight,
        gap,
        container_size,
        padding,
    }
    .resolve()
}

/// Clamps one axis of an overlay center into `[padding + half, extent - padding - half]`.
///
/// When the overlay does not fit (the upper bound falls below the lower bound),
/// the lower bound wins. Negative padding is treated as zero, and a non-finite
/// `value` collapses to the lower bound.
#[must_use]
pub fn clamp_axis(value: f64, half_extent: f64, container_extent: f64, padding: f64) -> f64 {
    let padding = padding.max(0.0);
    let lo = padding + half_extent;
    let hi = container_extent - padding - half_extent;
    if !value.is_finite() {
        return lo;
    }
    value.min(hi).max(lo)
}

/// Returns `true` if `anchor` can be used to place an overlay.
///
/// Rejects non-finite rectangles, rectangles with zero or negative extent (an
/// element that has not been laid out yet), and rectangles that lie entirely
/// outside a known container. An empty `container_size` skips the off-screen
/// check.
#[must_use]
pub fn is_valid_anchor(anchor: Rect, container_size: Size) -> bool {
    if !anchor.is_finite() {
        return false;
    }
    let anchor = anchor.abs();
    if anchor.width() <= 0.0 || anchor.height() <= 0.0 {
        return false;
    }
    if container_size.width <= 0.0 || container_size.height <= 0.0 {
        return true;
    }
    anchor.x1 > 0.0
        && anchor.y1 > 0.0
        && anchor.x0 < container_size.width
        && anchor.y0 < container_size.height
}

fn raw_center(anchor: Rect, overlay_size: Size, edge: Edge, gap: f64) -> Point {
    let mid = anchor.center();
    match edge {
        Edge::Top => Point::new(mid.x, anchor.y0 - overlay_size.height * 0.5 - gap),
        Edge::Bottom => Point::new(mid.x, anchor.y1 + overlay_size.height * 0.5 + gap),
        Edge::Left => Point::new(anchor.x0 - overlay_size.width * 0.5 - gap, mid.y),
        Edge::Right => Point::new(anchor.x1 + overlay_size.width * 0.5 + gap, mid.y),
    }
}
