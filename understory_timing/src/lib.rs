// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timer queues for UI runtimes.
//!
//! UI state machines often need to do something "later": finish an animation
//! phase after its duration, dismiss a toast after a delay, settle a drag after
//! a debounce. This crate models those suspension points as entries in a
//! [`TimerQueue`] instead of blocking waits or runtime-specific timers.
//!
//! The host owns the clock. It feeds a monotonic timestamp (milliseconds, in
//! whatever epoch it likes) into [`TimerQueue::pop_due`] or
//! [`TimerQueue::drain_due`] once per frame or whenever its event loop wakes,
//! and uses [`TimerQueue::next_deadline`] to decide when to wake next.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let now = 1_000;
//!
//! let fade = timers.schedule_after(now, Duration::from_millis(200), "fade finished");
//! let toast = timers.schedule_after(now, Duration::from_secs(3), "toast expired");
//! assert_eq!(timers.next_deadline(), Some(1_200));
//!
//! // The toast was closed by hand; its timer will never fire.
//! assert!(timers.cancel(toast));
//!
//! let due = timers.drain_due(5_000);
//! assert_eq!(due.len(), 1);
//! assert_eq!(due[0].id, fade);
//! assert_eq!(due[0].payload, "fade finished");
//! assert!(timers.is_empty());
//! ```
//!
//! ## Ordering
//!
//! Timers fire in deadline order. Timers sharing a deadline fire in the order
//! they were scheduled.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Timer, TimerId, TimerQueue, duration_to_millis};
