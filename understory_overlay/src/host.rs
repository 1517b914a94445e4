// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay host: one active session, the phase state machine, and the
//! timers that drive it.

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use tracing::{debug, trace};
use understory_event_state::drag::DragRelease;
use understory_placement::{MainAxisOrder, PlacementRequest, arrow_offset, is_valid_anchor};
use understory_timing::{TimerId, TimerQueue};

use crate::config::OverlayConfiguration;
use crate::gesture::{DragDismissController, DragOutcome};
use crate::phase::{Appearance, Phase};
use crate::session::{
    DeferredDismissal, DismissCallback, DismissEvent, DismissReason, PresentationSession,
    SequenceId,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerKind {
    EntryComplete,
    ExitComplete,
    AutoDismiss,
}

#[derive(Copy, Clone, Debug)]
struct HostTimer {
    sequence_id: SequenceId,
    kind: TimerKind,
}

/// Result of routing a tap through [`OverlayHost::handle_tap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TapOutcome {
    /// No overlay claimed the tap; deliver it to the content below.
    PassThrough,
    /// The tap landed on the overlay's content.
    Content,
    /// The tap landed outside the overlay and dismissed it.
    Dismissed,
}

/// Read-only snapshot of what the rendering layer should paint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayState {
    /// Current session, if any.
    pub sequence_id: Option<SequenceId>,
    /// Current phase.
    pub phase: Phase,
    /// `true` while entering or presented.
    pub is_presented: bool,
    /// Resolved overlay center, once a valid placement exists.
    pub resolved_position: Option<Point>,
    /// Resolved overlay bounds, once a valid placement exists.
    pub overlay_rect: Option<Rect>,
    /// Arrow position along the cross axis, from the overlay's start edge.
    pub arrow_offset: Option<f64>,
    /// Arrow/content ordering along the main axis.
    pub main_axis_order: Option<MainAxisOrder>,
    /// Visual targets for the current phase.
    pub appearance: Appearance,
}

impl OverlayState {
    /// The state with nothing shown.
    pub const IDLE: Self = Self {
        sequence_id: None,
        phase: Phase::Idle,
        is_presented: false,
        resolved_position: None,
        overlay_rect: None,
        arrow_offset: None,
        main_axis_order: None,
        appearance: Appearance::HIDDEN,
    };
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Coordinates at most one active presentation for an overlay family.
///
/// The host is driven entirely by its caller:
///
/// - layout feeds [`set_container_size`](Self::set_container_size),
///   [`set_overlay_size`](Self::set_overlay_size), and
///   [`update_anchor`](Self::update_anchor);
/// - the event loop calls [`advance`](Self::advance) with a monotonic
///   millisecond clock so entry, exit, and auto-dismiss timers can fire
///   (use [`next_deadline`](Self::next_deadline) to decide when to wake);
/// - input feeds [`handle_tap`](Self::handle_tap),
///   [`drag_changed`](Self::drag_changed), and
///   [`drag_ended`](Self::drag_ended);
/// - the renderer reads [`state`](Self::state), polling
///   [`revision`](Self::revision) to detect changes.
///
/// Every timer carries the [`SequenceId`] of the session that scheduled it.
/// Timers belonging to a superseded session are dropped when they fire.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_overlay::{OverlayConfiguration, OverlayHost, Phase};
///
/// let mut host = OverlayHost::new();
/// host.set_container_size(Size::new(300.0, 600.0));
/// host.set_overlay_size(Size::new(120.0, 40.0));
///
/// let anchor = Rect::new(100.0, 200.0, 150.0, 250.0);
/// host.present("tooltip", OverlayConfiguration::new(), anchor);
/// assert_eq!(host.phase(), Phase::Entering);
///
/// host.advance(300);
/// assert_eq!(host.phase(), Phase::Presented);
///
/// host.dismiss();
/// host.advance(500);
/// assert_eq!(host.phase(), Phase::Idle);
/// ```
pub struct OverlayHost<C, S = ()> {
    session: Option<PresentationSession<C, S>>,
    last_sequence: u64,
    timers: TimerQueue<HostTimer>,
    session_timers: SmallVec<[TimerId; 4]>,
    now: u64,
    container_size: Size,
    measured_size: Size,
    reduced_motion: bool,
    revision: u64,
    deferred: SmallVec<[DeferredDismissal; 2]>,
    defer_callbacks: bool,
}

impl<C, S> Default for OverlayHost<C, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> fmt::Debug for OverlayHost<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayHost")
            .field("sequence_id", &self.current_sequence())
            .field("phase", &self.phase())
            .field("now", &self.now)
            .field("container_size", &self.container_size)
            .field("measured_size", &self.measured_size)
            .field("reduced_motion", &self.reduced_motion)
            .field("pending_timers", &self.timers.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<C, S> OverlayHost<C, S> {
    /// Creates an idle host at time zero with no known container size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: None,
            last_sequence: 0,
            timers: TimerQueue::new(),
            session_timers: SmallVec::new(),
            now: 0,
            container_size: Size::ZERO,
            measured_size: Size::ZERO,
            reduced_motion: false,
            revision: 0,
            deferred: SmallVec::new(),
            defer_callbacks: false,
        }
    }

    /// A host whose dismiss callbacks are collected instead of run, so a
    /// wrapper can run them after releasing its borrow.
    #[cfg(feature = "std")]
    pub(crate) fn deferring() -> Self {
        Self {
            defer_callbacks: true,
            ..Self::new()
        }
    }

    /// The live session, including one that is exiting.
    #[must_use]
    pub fn session(&self) -> Option<&PresentationSession<C, S>> {
        self.session.as_ref()
    }

    /// Id of the live session, if any.
    #[must_use]
    pub fn current_sequence(&self) -> Option<SequenceId> {
        self.session.as_ref().map(|s| s.sequence_id)
    }

    /// Current phase; [`Phase::Idle`] when no session is live.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    /// Returns `true` while entering or presented.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.phase().is_active()
    }

    /// Monotonic counter bumped on every observable change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Latest time passed to [`advance`](Self::advance).
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Container size, once known.
    #[must_use]
    pub fn container_size(&self) -> Option<Size> {
        has_area(self.container_size).then_some(self.container_size)
    }

    /// Whether reduced-motion durations are in effect.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Earliest pending timer deadline, for scheduling the next wake-up.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Snapshot for the rendering layer.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        let Some(session) = &self.session else {
            return OverlayState::IDLE;
        };
        let config = &session.configuration;
        let side = config.side();
        let shown = Appearance::shown(
            side.main_axis(),
            session.drag_offset,
            config.backdrop_opacity(),
        );
        let appearance = match session.phase {
            Phase::Entering | Phase::Presented if !session.awaiting_layout => shown,
            Phase::Exiting => Appearance {
                offset: shown.offset,
                ..Appearance::HIDDEN
            },
            _ => Appearance::HIDDEN,
        };
        let placement = session.placement;
        OverlayState {
            sequence_id: Some(session.sequence_id),
            phase: session.phase,
            is_presented: session.phase.is_active(),
            resolved_position: placement.map(|p| p.center),
            overlay_rect: placement.map(|p| p.rect),
            arrow_offset: placement.map(|p| {
                arrow_offset(
                    session.anchor,
                    p.rect,
                    side,
                    config.arrow_alignment(),
                    config.arrow_inset(),
                )
            }),
            main_axis_order: Some(side.main_axis_order(config.layout_direction())),
            appearance,
        }
    }

    /// Presents `content` next to `anchor`, superseding any live session.
    ///
    /// Returns the new session's id. A superseded session is discarded
    /// immediately and its pending timers are cancelled.
    pub fn present(
        &mut self,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
    ) -> SequenceId {
        let id = self.install(content, configuration, anchor, None);
        self.flush();
        id
    }

    /// Like [`present`](Self::present), with a callback run once when the
    /// session is dismissed or superseded.
    pub fn present_with(
        &mut self,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
        on_dismiss: impl FnOnce(DismissEvent) + 'static,
    ) -> SequenceId {
        let id = self.install(content, configuration, anchor, Some(Box::new(on_dismiss)));
        self.flush();
        id
    }

    /// Records a new anchor rectangle for the live session.
    ///
    /// Accepted only while entering or presented. A zero-size or off-screen
    /// rectangle is ignored and the overlay keeps its last valid position.
    /// Returns `true` if the update was accepted.
    pub fn update_anchor(&mut self, anchor: Rect) -> bool {
        let container = self.container_size;
        let phase = self.phase();
        let Some(session) = self.session.as_mut().filter(|s| s.phase.is_active()) else {
            trace!(?phase, "dropping anchor update outside an active phase");
            return false;
        };
        if !is_valid_anchor(anchor, container) {
            trace!(
                sequence = session.sequence_id.get(),
                ?anchor,
                "ignoring degenerate anchor"
            );
            return false;
        }
        if session.anchor != anchor {
            session.anchor = anchor;
            self.relayout();
            self.bump();
        }
        true
    }

    /// Records the container (viewport) size.
    pub fn set_container_size(&mut self, size: Size) {
        if self.container_size == size {
            return;
        }
        self.container_size = size;
        self.relayout();
        self.bump();
    }

    /// Records the measured overlay size, before maximums are applied.
    ///
    /// Non-finite or negative sizes are ignored and the last valid size is
    /// kept.
    pub fn set_overlay_size(&mut self, size: Size) {
        if !size.is_finite() || size.width < 0.0 || size.height < 0.0 {
            trace!(?size, "ignoring degenerate overlay size");
            return;
        }
        if self.measured_size == size {
            return;
        }
        self.measured_size = size;
        if let Some(session) = self.session.as_mut().filter(|s| s.phase.is_active()) {
            session.overlay_size = session.configuration.constrain(size);
            self.relayout();
            self.bump();
        }
    }

    /// Switches between regular and reduced-motion durations for animations
    /// started from now on.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Dismisses the live session.
    ///
    /// Idempotent: returns `false` and does nothing if the session is already
    /// exiting or no session is live.
    pub fn dismiss(&mut self) -> bool {
        let dismissed = self.begin_exit(DismissReason::Programmatic);
        self.flush();
        dismissed
    }

    /// Dismisses the session `id` if it is still the live one.
    pub fn dismiss_session(&mut self, id: SequenceId) -> bool {
        if self.current_sequence() != Some(id) {
            trace!(stale = id.get(), "dismiss for a superseded session");
            return false;
        }
        self.dismiss()
    }

    /// Advances the host clock to `now` (milliseconds) and fires due timers.
    ///
    /// The clock never moves backwards.
    pub fn advance(&mut self, now: u64) {
        self.now = self.now.max(now);
        while let Some(timer) = self.timers.pop_due(self.now) {
            self.session_timers.retain(|id| *id != timer.id);
            self.fire(timer.payload);
        }
        self.flush();
    }

    /// Reports that an externally driven entry or exit animation for `id`
    /// finished.
    ///
    /// Completions for superseded sessions, or for a phase the session has
    /// already left, are ignored. Returns `true` if a transition happened.
    pub fn complete_transition(&mut self, id: SequenceId) -> bool {
        if self.current_sequence() != Some(id) {
            trace!(stale = id.get(), "dropping completion for a superseded session");
            return false;
        }
        let done = match self.phase() {
            Phase::Entering => self.finish_entry(),
            Phase::Exiting => self.finish_exit(),
            Phase::Idle | Phase::Presented => false,
        };
        self.flush();
        done
    }

    /// Routes a tap at `point` (container coordinates).
    pub fn handle_tap(&mut self, point: Point) -> TapOutcome {
        let Some(session) = self.session.as_ref().filter(|s| s.phase.is_active()) else {
            return TapOutcome::PassThrough;
        };
        if session.placement.is_some_and(|p| p.rect.contains(point)) {
            return TapOutcome::Content;
        }
        if !session.configuration.dismiss().dismiss_on_outside_tap {
            return TapOutcome::PassThrough;
        }
        self.begin_exit(DismissReason::OutsideTap);
        self.flush();
        TapOutcome::Dismissed
    }

    /// Updates the drag offset from a raw translation along the side's main
    /// axis. Returns `false` if drag-to-dismiss is disabled or nothing is
    /// presented.
    pub fn drag_changed(&mut self, translation: f64) -> bool {
        let Some(controller) = self.drag_controller() else {
            return false;
        };
        let offset = controller.damped_offset(translation);
        if let Some(session) = self.session.as_mut() {
            session.drag_offset = offset;
        }
        self.bump();
        true
    }

    /// Ends a drag with the given translation and release velocity along the
    /// side's main axis, dismissing or snapping back.
    ///
    /// Returns `None` if drag-to-dismiss is disabled or nothing is presented.
    pub fn drag_ended(&mut self, translation: f64, velocity: f64) -> Option<DragOutcome> {
        let controller = self.drag_controller()?;
        let outcome = controller.release(translation, velocity);
        match outcome {
            DragOutcome::Dismiss => {
                self.begin_exit(DismissReason::Drag);
            }
            DragOutcome::SnapBack => {
                if let Some(session) = self.session.as_mut() {
                    session.drag_offset = 0.0;
                }
                self.bump();
            }
        }
        self.flush();
        Some(outcome)
    }

    /// Ends a drag tracked by [`DragState`](understory_event_state::drag::DragState),
    /// projecting it onto the side's main axis.
    pub fn drag_released(&mut self, release: DragRelease) -> Option<DragOutcome> {
        let controller = self.drag_controller()?;
        self.drag_ended(
            controller.project(release.translation),
            controller.project(release.velocity),
        )
    }

    #[cfg(feature = "std")]
    pub(crate) fn take_deferred(&mut self) -> SmallVec<[DeferredDismissal; 2]> {
        mem::take(&mut self.deferred)
    }

    fn install(
        &mut self,
        content: C,
        configuration: OverlayConfiguration<S>,
        anchor: Rect,
        on_dismiss: Option<DismissCallback>,
    ) -> SequenceId {
        if let Some(mut old) = self.session.take() {
            debug!(
                superseded = old.sequence_id.get(),
                phase = ?old.phase,
                "superseding overlay session"
            );
            if old.phase.is_active() {
                self.deferred
                    .extend(old.take_dismissal(DismissReason::Superseded));
            }
            self.cancel_session_timers();
        }
        self.last_sequence += 1;
        let id = SequenceId::new(self.last_sequence);
        let mut session = PresentationSession::new(id, content, configuration, anchor, on_dismiss);
        session.overlay_size = session.configuration.constrain(self.measured_size);
        self.session = Some(session);
        debug!(sequence = id.get(), "overlay entering");
        self.relayout();
        self.bump();
        id
    }

    /// Recomputes placement for the live session and starts the entry
    /// animation once a valid placement exists.
    fn relayout(&mut self) {
        let container = self.container_size;
        let Some(session) = self.session.as_mut().filter(|s| s.phase.is_active()) else {
            return;
        };
        if !has_area(container) || !is_valid_anchor(session.anchor, container) {
            trace!(
                sequence = session.sequence_id.get(),
                "skipping placement until layout is valid"
            );
        } else {
            let config = &session.configuration;
            session.placement = Some(
                PlacementRequest {
                    anchor: session.anchor,
                    overlay_size: session.overlay_size,
                    side: config.side(),
                    direction: config.layout_direction(),
                    gap: config.gap(),
                    container_size: container,
                    padding: config.padding(),
                }
                .place(),
            );
        }
        if session.awaiting_layout && session.placement.is_some() {
            session.awaiting_layout = false;
            let entry = session
                .configuration
                .motion()
                .entry_duration(self.reduced_motion);
            let id = self.timers.schedule_after(
                self.now,
                entry,
                HostTimer {
                    sequence_id: session.sequence_id,
                    kind: TimerKind::EntryComplete,
                },
            );
            self.session_timers.push(id);
        }
    }

    fn begin_exit(&mut self, reason: DismissReason) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.phase.is_active() {
            trace!(
                sequence = session.sequence_id.get(),
                phase = ?session.phase,
                "dismiss ignored"
            );
            return false;
        }
        debug_assert!(session.phase.can_transition_to(Phase::Exiting));
        session.phase = Phase::Exiting;
        self.deferred.extend(session.take_dismissal(reason));
        let exit = session
            .configuration
            .motion()
            .exit_duration(self.reduced_motion);
        let sequence_id = session.sequence_id;
        let id = self.timers.schedule_after(
            self.now,
            exit,
            HostTimer {
                sequence_id,
                kind: TimerKind::ExitComplete,
            },
        );
        self.session_timers.push(id);
        debug!(sequence = sequence_id.get(), ?reason, "overlay exiting");
        self.bump();
        true
    }

    fn finish_entry(&mut self) -> bool {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.phase == Phase::Entering && !s.awaiting_layout)
        else {
            return false;
        };
        session.phase = Phase::Presented;
        let sequence_id = session.sequence_id;
        if let Some(delay) = session.configuration.dismiss().auto_dismiss {
            let id = self.timers.schedule_after(
                self.now,
                delay,
                HostTimer {
                    sequence_id,
                    kind: TimerKind::AutoDismiss,
                },
            );
            self.session_timers.push(id);
        }
        debug!(sequence = sequence_id.get(), "overlay presented");
        self.bump();
        true
    }

    fn finish_exit(&mut self) -> bool {
        if self.phase() != Phase::Exiting {
            return false;
        }
        if let Some(session) = self.session.take() {
            debug!(sequence = session.sequence_id.get(), "overlay idle");
        }
        self.cancel_session_timers();
        self.bump();
        true
    }

    fn fire(&mut self, timer: HostTimer) {
        if self.current_sequence() != Some(timer.sequence_id) {
            trace!(
                stale = timer.sequence_id.get(),
                kind = ?timer.kind,
                "dropping timer for a superseded session"
            );
            return;
        }
        let applied = match timer.kind {
            TimerKind::EntryComplete => self.finish_entry(),
            TimerKind::ExitComplete => self.finish_exit(),
            TimerKind::AutoDismiss => {
                self.phase() == Phase::Presented && self.begin_exit(DismissReason::AutoDismiss)
            }
        };
        if !applied {
            trace!(
                sequence = timer.sequence_id.get(),
                kind = ?timer.kind,
                "timer no longer matches the session phase"
            );
        }
    }

    /// Cancels every timer scheduled for the session being discarded.
    ///
    /// Timers still carry their [`SequenceId`], so one that slips through is
    /// dropped by [`fire`](Self::fire) anyway.
    fn cancel_session_timers(&mut self) {
        for id in self.session_timers.drain(..) {
            self.timers.cancel(id);
        }
    }

    fn drag_controller(&self) -> Option<DragDismissController> {
        let session = self.session.as_ref().filter(|s| s.phase.is_active())?;
        let config = &session.configuration;
        config.drag_to_dismiss().then(|| {
            DragDismissController::for_side(
                config.drag_thresholds(),
                config.side(),
                config.layout_direction(),
            )
        })
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn flush(&mut self) {
        if self.defer_callbacks {
            return;
        }
        for dismissal in mem::take(&mut self.deferred) {
            dismissal.run();
        }
    }
}

fn has_area(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}
