// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Overlay: anchored popovers, tooltips, and side panels.
//!
//! This crate presents one floating panel at a time next to a trigger element
//! and manages its show/hide lifecycle. It is renderer- and toolkit-agnostic:
//! callers push layout facts and input in, and read back a snapshot of what to
//! paint.
//!
//! The core concepts are:
//!
//! - [`OverlayHost`]: owns at most one [`PresentationSession`] and drives it
//!   through the [`Phase`] state machine
//!   `Idle → Entering → Presented → Exiting → Idle`. Presenting while another
//!   overlay is live supersedes it. Timers and completions carry a
//!   [`SequenceId`] and are ignored once their session is gone.
//! - [`OverlayConfiguration`]: side, gap, padding, dismissal, backdrop, drag,
//!   motion, and a caller-defined style payload.
//! - [`anchor::AnchorObserver`]: turns per-layout anchor readings into
//!   change notifications for [`OverlayHost::update_anchor`].
//! - [`gesture::DragDismissController`]: rubber-banded drag offsets and the
//!   dismiss/snap-back decision.
//! - [`surface::RenderCompositor`]: keeps a layered or topmost surface shown
//!   exactly while an overlay is live, and routes hits.
//! - `shared::SharedHost` (with the `std` feature): a re-entrancy-safe,
//!   shareable handle, plus a per-thread instance per content type.
//!
//! Placement math lives in [`understory_placement`] and timers in
//! [`understory_timing`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_overlay::{OverlayConfiguration, OverlayHost, Phase, TapOutcome};
//!
//! let mut host = OverlayHost::new();
//! host.set_container_size(Size::new(300.0, 600.0));
//! host.set_overlay_size(Size::new(120.0, 40.0));
//!
//! let anchor = Rect::new(100.0, 200.0, 150.0, 250.0);
//! let id = host.present("Copied!", OverlayConfiguration::new(), anchor);
//!
//! let state = host.state();
//! assert_eq!(state.sequence_id, Some(id));
//! assert_eq!(state.resolved_position, Some(Point::new(125.0, 276.0)));
//!
//! // The entry animation finishes after 300 ms.
//! host.advance(300);
//! assert_eq!(host.phase(), Phase::Presented);
//!
//! // Tapping outside dismisses; the exit takes 200 ms.
//! assert_eq!(host.handle_tap(Point::new(10.0, 10.0)), TapOutcome::Dismissed);
//! host.advance(500);
//! assert_eq!(host.phase(), Phase::Idle);
//! ```
//!
//! ## Logging
//!
//! Phase transitions are logged at `debug` level through [`tracing`]; dropped
//! stale timers and ignored inputs at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod anchor;
mod config;
pub mod gesture;
mod host;
mod phase;
mod session;
#[cfg(feature = "std")]
pub mod shared;
pub mod surface;

pub use config::{DismissPolicy, MotionTimings, OverlayConfiguration};
pub use gesture::{DragDismissController, DragOutcome, DragThresholds};
pub use host::{OverlayHost, OverlayState, TapOutcome};
pub use phase::{Appearance, HIDDEN_SCALE, Phase};
pub use session::{DismissCallback, DismissEvent, DismissReason, PresentationSession, SequenceId};

pub use understory_placement::{ArrowAlignment, LayoutDirection, MainAxisOrder, Side};
