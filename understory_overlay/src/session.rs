// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data behind one live overlay.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Rect, Size};
use understory_placement::Placement;

use crate::config::OverlayConfiguration;
use crate::phase::Phase;

/// Identifies a presentation within one host.
///
/// Ids are strictly increasing. Anything that completes asynchronously
/// (timers, animation callbacks) carries the id of the session that started it
/// and is dropped if that session is no longer current.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

impl SequenceId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Why a presentation stopped being shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// The user tapped outside the overlay.
    OutsideTap,
    /// The user dragged the overlay past a dismiss threshold.
    Drag,
    /// The auto-dismiss delay elapsed.
    AutoDismiss,
    /// The caller asked for dismissal.
    Programmatic,
    /// A newer presentation replaced this one.
    Superseded,
}

/// Delivered to a session's dismiss callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DismissEvent {
    /// The session that was dismissed.
    pub sequence_id: SequenceId,
    /// Why it was dismissed.
    pub reason: DismissReason,
}

/// Callback run once when a session is dismissed or superseded.
pub type DismissCallback = Box<dyn FnOnce(DismissEvent)>;

/// One active overlay: content, configuration, anchor snapshot, and phase.
///
/// Sessions are created by [`OverlayHost::present`](crate::OverlayHost::present)
/// and discarded when their exit animation completes. The content reference is
/// held until then so the overlay can keep rendering while it fades out.
pub struct PresentationSession<C, S = ()> {
    pub(crate) sequence_id: SequenceId,
    pub(crate) content: C,
    pub(crate) configuration: OverlayConfiguration<S>,
    pub(crate) anchor: Rect,
    pub(crate) phase: Phase,
    pub(crate) drag_offset: f64,
    pub(crate) overlay_size: Size,
    pub(crate) placement: Option<Placement>,
    pub(crate) awaiting_layout: bool,
    pub(crate) on_dismiss: Option<DismissCallback>,
}

impl<C, S> PresentationSession<C, S> {
    pub(crate) fn new(
        sequence_id: SequenceId,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
        on_dismiss: Option<DismissCallback>,
    ) -> Self {
        Self {
            sequence_id,
            content,
            configuration,
            anchor,
            phase: Phase::Entering,
            drag_offset: 0.0,
            overlay_size: Size::ZERO,
            placement: None,
            awaiting_layout: true,
            on_dismiss,
        }
    }

    /// The session's id.
    #[must_use]
    pub fn sequence_id(&self) -> SequenceId {
        self.sequence_id
    }

    /// The content being presented.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// The configuration the session was presented with.
    #[must_use]
    pub fn configuration(&self) -> &OverlayConfiguration<S> {
        &self.configuration
    }

    /// The most recent anchor rectangle, valid or not.
    #[must_use]
    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current damped drag offset along the side's main axis.
    #[must_use]
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    /// Overlay size after applying the configured maximums.
    #[must_use]
    pub fn overlay_size(&self) -> Size {
        self.overlay_size
    }

    /// Last valid placement, if one has been resolved.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Returns `true` while the entry animation is held back waiting for a
    /// container size and a valid anchor.
    #[must_use]
    pub fn is_awaiting_layout(&self) -> bool {
        self.awaiting_layout
    }

    pub(crate) fn take_dismissal(&mut self, reason: DismissReason) -> Option<DeferredDismissal> {
        let callback = self.on_dismiss.take()?;
        Some(DeferredDismissal {
            callback,
            event: DismissEvent {
                sequence_id: self.sequence_id,
                reason,
            },
        })
    }
}

impl<C: fmt::Debug, S: fmt::Debug> fmt::Debug for PresentationSession<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationSession")
            .field("sequence_id", &self.sequence_id)
            .field("content", &self.content)
            .field("configuration", &self.configuration)
            .field("anchor", &self.anchor)
            .field("phase", &self.phase)
            .field("drag_offset", &self.drag_offset)
            .field("overlay_size", &self.overlay_size)
            .field("placement", &self.placement)
            .field("awaiting_layout", &self.awaiting_layout)
            .field("has_on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

/// A dismiss callback paired with its event, waiting to run once the host's
/// state is consistent.
pub(crate) struct DeferredDismissal {
    callback: DismissCallback,
    event: DismissEvent,
}

impl DeferredDismissal {
    pub(crate) fn run(self) {
        (self.callback)(self.event);
    }
}

impl fmt::Debug for DeferredDismissal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredDismissal")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}
