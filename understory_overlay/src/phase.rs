// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation phases and the visual targets derived from them.

use kurbo::Vec2;
use understory_placement::Axis;

/// Lifecycle phase of a presentation.
///
/// Transitions run `Idle → Entering → Presented → Exiting → Idle`. The only
/// shortcut is an interrupted entry (`Entering → Exiting`), taken when the
/// overlay is dismissed before its entry animation completes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing is shown.
    #[default]
    Idle,
    /// The entry animation is running.
    Entering,
    /// Fully shown.
    Presented,
    /// The exit animation is running.
    Exiting,
}

impl Phase {
    /// Returns `true` for phases that accept anchor updates and dismissal.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Entering | Self::Presented)
    }

    /// Returns `true` for every phase except [`Phase::Idle`].
    #[must_use]
    pub fn is_visible(self) -> bool {
        self != Self::Idle
    }

    /// Returns `true` if `self → next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Entering)
                | (Self::Entering, Self::Presented)
                | (Self::Entering, Self::Exiting)
                | (Self::Presented, Self::Exiting)
                | (Self::Exiting, Self::Idle)
        )
    }
}

/// Scale applied to a hidden overlay; it grows to `1.0` while entering.
pub const HIDDEN_SCALE: f64 = 0.92;

/// Visual targets for the rendering layer.
///
/// These are the values the overlay animates *towards* for the current phase;
/// interpolation is up to the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Appearance {
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f64,
    /// Overlay scale about its anchor-facing edge.
    pub scale: f64,
    /// Translation applied on top of the resolved position (drag offset).
    pub offset: Vec2,
    /// Backdrop opacity in `[0, 1]`.
    pub backdrop_opacity: f64,
}

impl Appearance {
    /// Targets for a hidden overlay.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: HIDDEN_SCALE,
        offset: Vec2::ZERO,
        backdrop_opacity: 0.0,
    };

    /// Targets for a shown overlay dragged `drag_offset` along `axis`.
    #[must_use]
    pub fn shown(axis: Axis, drag_offset: f64, backdrop_opacity: f64) -> Self {
        let offset = match axis {
            Axis::Horizontal => Vec2::new(drag_offset, 0.0),
            Axis::Vertical => Vec2::new(0.0, drag_offset),
        };
        Self {
            opacity: 1.0,
            scale: 1.0,
            offset,
            backdrop_opacity,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::HIDDEN
    }
}
