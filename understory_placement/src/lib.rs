// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: where an anchored overlay should appear.
//!
//! This crate answers one question for popovers, tooltips, and side panels:
//! given the on-screen rectangle of a trigger (the *anchor*), the measured size
//! of the floating panel, a preferred [`Side`], and the size of the container it
//! must stay inside, where should the panel's center go?
//!
//! The core concepts are:
//!
//! - [`Side`]: the preferred side of the anchor (`Top`, `Bottom`, `Leading`,
//!   `Trailing`). Leading and trailing are resolved to physical edges through a
//!   [`LayoutDirection`].
//! - [`resolve`] / [`PlacementRequest`]: a pure function from anchor, overlay
//!   size, side, gap, container size, and edge padding to a clamped center
//!   [`Point`](kurbo::Point).
//! - [`ArrowAlignment`] / [`arrow_offset`]: where a pointer arrow sits along the
//!   overlay's cross axis.
//! - [`MainAxisOrder`]: whether the arrow comes before or after the content
//!   along the main axis, so the host can order its stack without switching on
//!   the side itself.
//!
//! The crate does not own any view tree, measurement, or animation state.
//! Callers feed it rectangles in a single shared coordinate space and read back
//! points in that same space.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{Side, resolve};
//!
//! // A 50x50 trigger at (100, 200) inside a 300x600 window.
//! let anchor = Rect::new(100.0, 200.0, 150.0, 250.0);
//! let center = resolve(
//!     anchor,
//!     Size::new(120.0, 40.0),
//!     Side::Bottom,
//!     6.0,
//!     Size::new(300.0, 600.0),
//!     8.0,
//! );
//! // Below the anchor: 250 (anchor bottom) + 20 (half height) + 6 (gap).
//! assert_eq!(center, Point::new(125.0, 276.0));
//! ```
//!
//! ## Clamping
//!
//! After the raw point is computed, each axis is clamped so the overlay's
//! bounding box, inset by `padding`, stays inside `[0, container]`. When the
//! overlay is larger than the available space, the lower bound wins so the
//! overlay's leading/top edge stays on screen; see [`clamp_axis`].
//!
//! This crate is `no_std`.

#![no_std]

mod arrow;
mod resolve;
mod side;

pub use arrow::{ArrowAlignment, arrow_offset};
pub use resolve::{Placement, PlacementRequest, clamp_axis, is_valid_anchor, resolve};
pub use side::{Axis, Edge, LayoutDirection, MainAxisOrder, Side};
