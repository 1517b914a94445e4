// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event State: Common event state managers for UI interactions.
//!
//! This crate provides small, focused state machines for UI interactions that
//! require stateful tracking across multiple events:
//!
//! - [`drag`]: Track drag operations with movement deltas, total offsets, and
//!   the translation/velocity pair reported on release
//! - [`velocity`]: Estimate pointer velocity from timestamped samples over a
//!   short trailing window
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Work with any event routing or spatial query system
//!
//! The crate does not assume any particular UI framework, event system, or
//! clock. Timestamps are plain `u64` milliseconds from whatever monotonic
//! source the host uses.
//!
//! ### Drag Operations
//!
//! Use [`drag::DragState`] to track pointer drag operations:
//!
//! ```rust
//! # #[cfg(feature = "drag")]
//! # fn example() {
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start drag at (10, 10)
//! drag.start(Point::new(10.0, 10.0), 0);
//!
//! // Move pointer, get delta since last position
//! let delta = drag.update(Point::new(15.0, 12.0), 16).unwrap();
//! // delta is (5.0, 2.0)
//!
//! // Release: total translation plus release velocity
//! let release = drag.finish(Point::new(20.0, 12.0), 32).unwrap();
//! // release.translation is (10.0, 2.0)
//! # }
//! ```
//!
//! ## Integration with Understory
//!
//! `understory_overlay` feeds [`drag::DragRelease`] values into its
//! drag-to-dismiss controller, which decides between dismissing an overlay and
//! snapping it back.
//!
//! ## Features
//!
//! - `drag`: Enable drag and velocity tracking (requires `kurbo` and `smallvec`)
//!
//! This crate is `no_std` compatible.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
#[cfg(feature = "drag")]
pub mod velocity;
