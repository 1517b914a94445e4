// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shareable host for one overlay family per thread.
//!
//! [`SharedHost`] wraps an [`OverlayHost`] in `Rc<RefCell<_>>` so the trigger,
//! the input layer, and the renderer can all hold a handle. Dismiss callbacks
//! run only after the host borrow is released, so a callback may call back
//! into the same host (for example to present a follow-up overlay).
//!
//! [`shared_host`] returns the thread's instance for a given content and
//! style type. Tooltips and menus that use different content types therefore
//! get independent hosts.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::{Any, TypeId};
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use std::thread_local;
use understory_event_state::drag::DragRelease;

use crate::config::OverlayConfiguration;
use crate::gesture::DragOutcome;
use crate::host::{OverlayHost, OverlayState, TapOutcome};
use crate::phase::Phase;
use crate::session::{DismissEvent, SequenceId};

/// A reference-counted handle to an [`OverlayHost`].
///
/// Cloning the handle shares the host.
pub struct SharedHost<C, S = ()> {
    inner: Rc<RefCell<OverlayHost<C, S>>>,
}

impl<C, S> Clone for SharedHost<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C, S> Default for SharedHost<C, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> fmt::Debug for SharedHost<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(host) => f.debug_tuple("SharedHost").field(&*host).finish(),
            Err(_) => f.write_str("SharedHost(<borrowed>)"),
        }
    }
}

impl<C, S> SharedHost<C, S> {
    /// Creates a new, unshared host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(OverlayHost::deferring())),
        }
    }

    /// Returns `true` if both handles refer to the same host.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs `f` with shared access to the host.
    ///
    /// # Panics
    ///
    /// Panics if called from inside [`mutate`](Self::mutate) on the same host.
    pub fn with<R>(&self, f: impl FnOnce(&OverlayHost<C, S>) -> R) -> R {
        f(&*self.inner.borrow())
    }

    /// Runs `f` with exclusive access to the host, then runs any dismiss
    /// callbacks it produced after the borrow is released.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f` itself. Calling back in
    /// from a dismiss callback is fine.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut OverlayHost<C, S>) -> R) -> R {
        let (result, deferred) = {
            let mut host = self.inner.borrow_mut();
            let result = f(&mut *host);
            (result, host.take_deferred())
        };
        for dismissal in deferred {
            dismissal.run();
        }
        result
    }

    /// See [`OverlayHost::present`].
    pub fn present(
        &self,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
    ) -> SequenceId {
        self.mutate(|h| h.present(content, configuration, anchor))
    }

    /// See [`OverlayHost::present_with`].
    pub fn present_with(
        &self,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
        on_dismiss: impl FnOnce(DismissEvent) + 'static,
    ) -> SequenceId {
        self.mutate(|h| h.present_with(content, configuration, anchor, on_dismiss))
    }

    /// See [`OverlayHost::update_anchor`].
    pub fn update_anchor(&self, anchor: Rect) -> bool {
        self.mutate(|h| h.update_anchor(anchor))
    }

    /// See [`OverlayHost::set_container_size`].
    pub fn set_container_size(&self, size: Size) {
        self.mutate(|h| h.set_container_size(size));
    }

    /// See [`OverlayHost::set_overlay_size`].
    pub fn set_overlay_size(&self, size: Size) {
        self.mutate(|h| h.set_overlay_size(size));
    }

    /// See [`OverlayHost::set_reduced_motion`].
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.mutate(|h| h.set_reduced_motion(reduced));
    }

    /// See [`OverlayHost::dismiss`].
    pub fn dismiss(&self) -> bool {
        self.mutate(OverlayHost::dismiss)
    }

    /// See [`OverlayHost::dismiss_session`].
    pub fn dismiss_session(&self, id: SequenceId) -> bool {
        self.mutate(|h| h.dismiss_session(id))
    }

    /// See [`OverlayHost::advance`].
    pub fn advance(&self, now: u64) {
        self.mutate(|h| h.advance(now));
    }

    /// See [`OverlayHost::complete_transition`].
    pub fn complete_transition(&self, id: SequenceId) -> bool {
        self.mutate(|h| h.complete_transition(id))
    }

    /// See [`OverlayHost::handle_tap`].
    pub fn handle_tap(&self, point: Point) -> TapOutcome {
        self.mutate(|h| h.handle_tap(point))
    }

    /// See [`OverlayHost::drag_changed`].
    pub fn drag_changed(&self, translation: f64) -> bool {
        self.mutate(|h| h.drag_changed(translation))
    }

    /// See [`OverlayHost::drag_ended`].
    pub fn drag_ended(&self, translation: f64, velocity: f64) -> Option<DragOutcome> {
        self.mutate(|h| h.drag_ended(translation, velocity))
    }

    /// See [`OverlayHost::drag_released`].
    pub fn drag_released(&self, release: DragRelease) -> Option<DragOutcome> {
        self.mutate(|h| h.drag_released(release))
    }

    /// See [`OverlayHost::state`].
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.with(OverlayHost::state)
    }

    /// See [`OverlayHost::phase`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.with(OverlayHost::phase)
    }

    /// See [`OverlayHost::current_sequence`].
    #[must_use]
    pub fn current_sequence(&self) -> Option<SequenceId> {
        self.with(OverlayHost::current_sequence)
    }

    /// See [`OverlayHost::revision`].
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.with(OverlayHost::revision)
    }

    /// See [`OverlayHost::next_deadline`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.borrow_mut().next_deadline()
    }
}

thread_local! {
    static REGISTRY: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// The calling thread's host for content type `C` and style type `S`.
///
/// The first call creates the host; later calls return handles to it.
#[must_use]
pub fn shared_host<C: 'static, S: 'static>() -> SharedHost<C, S> {
    let key = TypeId::of::<SharedHost<C, S>>();
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        if let Some(host) = registry
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<SharedHost<C, S>>())
        {
            return host.clone();
        }
        let host = SharedHost::new();
        registry.insert(key, Box::new(host.clone()));
        host
    })
}
