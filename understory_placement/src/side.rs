// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sides, physical edges, and axes.

/// Preferred side of the anchor on which an overlay is placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    #[default]
    Bottom,
    /// Before the anchor in reading order (left in left-to-right layouts).
    Leading,
    /// After the anchor in reading order (right in left-to-right layouts).
    Trailing,
}

/// Horizontal reading direction used to resolve [`Side::Leading`] and [`Side::Trailing`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Leading is left, trailing is right.
    #[default]
    LeftToRight,
    /// Leading is right, trailing is left.
    RightToLeft,
}

/// A physical edge of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Minimum y.
    Top,
    /// Maximum y.
    Bottom,
    /// Minimum x.
    Left,
    /// Maximum x.
    Right,
}

/// A layout axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Order of the arrow and the content along an overlay's main axis, in
/// increasing coordinate order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MainAxisOrder {
    /// `[arrow, content]`: the overlay sits after the anchor (bottom or right).
    ArrowFirst,
    /// `[content, arrow]`: the overlay sits before the anchor (top or left).
    ContentFirst,
}

impl Side {
    /// Resolves this side to a physical edge of the anchor.
    #[must_use]
    pub fn edge(self, direction: LayoutDirection) -> Edge {
        match (self, direction) {
            (Self::Top, _) => Edge::Top,
            (Self::Bottom, _) => Edge::Bottom,
            (Self::Leading, LayoutDirection::LeftToRight)
            | (Self::Trailing, LayoutDirection::RightToLeft) => Edge::Left,
            (Self::Leading, LayoutDirection::RightToLeft)
            | (Self::Trailing, LayoutDirection::LeftToRight) => Edge::Right,
        }
    }

    /// The axis along which the overlay is offset from its anchor.
    #[must_use]
    pub fn main_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Leading | Self::Trailing => Axis::Horizontal,
        }
    }

    /// The axis along which the overlay is centered on its anchor.
    #[must_use]
    pub fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }

    /// Arrow/content ordering along the main axis for the given direction.
    #[must_use]
    pub fn main_axis_order(self, direction: LayoutDirection) -> MainAxisOrder {
        self.edge(direction).main_axis_order()
    }

    /// Sign of the direction pointing from the anchor towards the overlay
    /// along the main axis: `-1.0` or `1.0`.
    #[must_use]
    pub fn away_sign(self, direction: LayoutDirection) -> f64 {
        self.edge(direction).outward_sign()
    }
}

impl Edge {
    /// The axis perpendicular to this edge.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `-1.0` for edges at the minimum coordinate, `1.0` otherwise.
    #[must_use]
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    /// Arrow/content ordering for an overlay placed against this edge.
    #[must_use]
    pub fn main_axis_order(self) -> MainAxisOrder {
        match self {
            Self::Bottom | Self::Right => MainAxisOrder::ArrowFirst,
            Self::Top | Self::Left => MainAxisOrder::ContentFirst,
        }
    }
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_and_trailing_follow_direction() {
        assert_eq!(Side::Leading.edge(LayoutDirection::LeftToRight), Edge::Left);
        assert_eq!(Side::Leading.edge(LayoutDirection::RightToLeft), Edge::Right);
        assert_eq!(Side::Trailing.edge(LayoutDirection::LeftToRight), Edge::Right);
        assert_eq!(Side::Trailing.edge(LayoutDirection::RightToLeft), Edge::Left);
        assert_eq!(Side::Top.edge(LayoutDirection::RightToLeft), Edge::Top);
    }

    #[test]
    fn main_axis_order_puts_arrow_next_to_anchor() {
        let ltr = LayoutDirection::LeftToRight;
        assert_eq!(Side::Bottom.main_axis_order(ltr), MainAxisOrder::ArrowFirst);
        assert_eq!(Side::Top.main_axis_order(ltr), MainAxisOrder::ContentFirst);
        assert_eq!(Side::Trailing.main_axis_order(ltr), MainAxisOrder::ArrowFirst);
        assert_eq!(Side::Leading.main_axis_order(ltr), MainAxisOrder::ContentFirst);
        assert_eq!(
            Side::Leading.main_axis_order(LayoutDirection::RightToLeft),
            MainAxisOrder::ArrowFirst
        );
    }

    #[test]
    fn away_sign_points_from_anchor_to_overlay() {
        let ltr = LayoutDirection::LeftToRight;
        assert_eq!(Side::Leading.away_sign(ltr), -1.0);
        assert_eq!(Side::Trailing.away_sign(ltr), 1.0);
        assert_eq!(Side::Top.away_sign(ltr), -1.0);
        assert_eq!(Side::Bottom.away_sign(ltr), 1.0);
    }

    #[test]
    fn axes() {
        assert_eq!(Side::Top.main_axis(), Axis::Vertical);
        assert_eq!(Side::Leading.cross_axis(), Axis::Vertical);
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }
}
