// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation lifecycle: supersession, stale timers, dismissal, and layout.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_overlay::{
    Appearance, DismissEvent, DismissReason, OverlayConfiguration, OverlayHost, Phase, Side,
    TapOutcome,
};

const ANCHOR: Rect = Rect::new(100.0, 200.0, 150.0, 250.0);

fn host() -> OverlayHost<&'static str> {
    let mut host = OverlayHost::new();
    host.set_container_size(Size::new(300.0, 600.0));
    host.set_overlay_size(Size::new(120.0, 40.0));
    host
}

type Log = Rc<RefCell<Vec<DismissEvent>>>;

fn record(log: &Log) -> impl FnOnce(DismissEvent) + 'static {
    let log = Rc::clone(log);
    move |event| log.borrow_mut().push(event)
}

#[test]
fn presenting_twice_keeps_only_the_newer_session() {
    let mut host = host();
    let first = host.present("first", OverlayConfiguration::new(), ANCHOR);
    let second = host.present("second", OverlayConfiguration::new(), ANCHOR);

    assert!(second > first);
    assert_eq!(host.current_sequence(), Some(second));
    assert_eq!(host.session().map(|s| *s.content()), Some("second"));
    assert_eq!(host.phase(), Phase::Entering);
}

#[test]
fn superseded_session_is_notified_once() {
    let log = Log::default();
    let mut host = host();
    let first = host.present_with("first", OverlayConfiguration::new(), ANCHOR, record(&log));
    host.present("second", OverlayConfiguration::new(), ANCHOR);
    host.present("third", OverlayConfiguration::new(), ANCHOR);

    assert_eq!(
        *log.borrow(),
        [DismissEvent {
            sequence_id: first,
            reason: DismissReason::Superseded,
        }]
    );
}

#[test]
fn timers_of_a_superseded_session_do_nothing() {
    let mut host = host();
    host.present("first", OverlayConfiguration::new(), ANCHOR);
    host.advance(100);
    let second = host.present("second", OverlayConfiguration::new(), ANCHOR);

    // The first session's entry timer is due now; the second's at 400.
    host.advance(300);
    assert_eq!(host.phase(), Phase::Entering);
    assert_eq!(host.current_sequence(), Some(second));

    host.advance(400);
    assert_eq!(host.phase(), Phase::Presented);
}

#[test]
fn stale_completions_are_ignored() {
    let mut host = host();
    let first = host.present("first", OverlayConfiguration::new(), ANCHOR);
    let second = host.present("second", OverlayConfiguration::new(), ANCHOR);
    let before = host.revision();

    assert!(!host.complete_transition(first));
    assert!(!host.dismiss_session(first));
    assert_eq!(host.revision(), before);
    assert_eq!(host.phase(), Phase::Entering);

    assert!(host.complete_transition(second));
    assert_eq!(host.phase(), Phase::Presented);
    // Already presented: a second completion has nothing to finish.
    assert!(!host.complete_transition(second));
}

#[test]
fn observed_phases_follow_the_state_machine() {
    let mut host = host();
    let mut observed = vec![host.phase()];
    let mut last_revision = host.revision();
    let mut observe = |host: &OverlayHost<&'static str>| {
        assert!(host.revision() >= last_revision);
        if host.revision() != last_revision && observed.last() != Some(&host.phase()) {
            observed.push(host.phase());
        }
        last_revision = host.revision();
    };

    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    observe(&host);
    for t in (0..=1000).step_by(50) {
        if t == 500 {
            host.dismiss();
            observe(&host);
        }
        host.advance(t);
        observe(&host);
    }

    assert_eq!(
        observed,
        [Phase::Idle, Phase::Entering, Phase::Presented, Phase::Exiting, Phase::Idle]
    );
    for pair in observed.windows(2) {
        assert!(pair[0].can_transition_to(pair[1]), "{pair:?}");
    }
}

#[test]
fn anchor_updates_while_idle_are_ignored() {
    let mut host = host();
    let before = host.revision();
    assert!(!host.update_anchor(ANCHOR));
    assert_eq!(host.revision(), before);
    assert_eq!(host.state(), understory_overlay::OverlayState::IDLE);
}

#[test]
fn anchor_updates_move_the_overlay() {
    let mut host = host();
    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    assert_eq!(host.state().resolved_position, Some(Point::new(125.0, 276.0)));

    assert!(host.update_anchor(ANCHOR + kurbo::Vec2::new(20.0, 0.0)));
    assert_eq!(host.state().resolved_position, Some(Point::new(145.0, 276.0)));
}

#[test]
fn degenerate_anchors_keep_the_last_position() {
    let mut host = host();
    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    let before = host.state();

    assert!(!host.update_anchor(Rect::ZERO));
    assert!(!host.update_anchor(Rect::new(1000.0, 1000.0, 1050.0, 1050.0)));
    assert_eq!(host.state(), before);
    assert_eq!(host.session().map(|s| s.anchor()), Some(ANCHOR));
}

#[test]
fn dismiss_is_idempotent() {
    let log = Log::default();
    let mut host = host();
    host.present_with("tip", OverlayConfiguration::new(), ANCHOR, record(&log));
    host.advance(300);

    assert!(host.dismiss());
    let exiting = host.revision();
    assert!(!host.dismiss());
    assert!(!host.dismiss());
    assert_eq!(host.revision(), exiting);
    assert_eq!(host.phase(), Phase::Exiting);
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].reason, DismissReason::Programmatic);

    host.advance(500);
    assert_eq!(host.phase(), Phase::Idle);
    assert!(!host.dismiss());
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn dismiss_while_entering_interrupts_the_entry() {
    let mut host = host();
    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    assert!(host.dismiss());
    assert_eq!(host.phase(), Phase::Exiting);

    host.advance(200);
    assert_eq!(host.phase(), Phase::Idle);
    // The interrupted entry timer went away with the session.
    assert_eq!(host.next_deadline(), None);
    host.advance(300);
    assert_eq!(host.phase(), Phase::Idle);
}

#[test]
fn superseding_cancels_the_old_session_timers() {
    let mut host = host();
    let lingering = OverlayConfiguration::new().with_auto_dismiss(Duration::from_secs(60));
    host.present("first", lingering, ANCHOR);
    host.advance(300);
    assert_eq!(host.next_deadline(), Some(60_300));

    host.present("second", OverlayConfiguration::new(), ANCHOR);
    assert_eq!(host.next_deadline(), Some(600));
    host.advance(600);
    assert_eq!(host.phase(), Phase::Presented);
    assert_eq!(host.next_deadline(), None);
}

#[test]
fn degenerate_overlay_sizes_keep_the_last_valid_size() {
    let mut host = host();
    host.set_overlay_size(Size::new(f64::NAN, 40.0));
    host.set_overlay_size(Size::new(f64::INFINITY, 40.0));
    host.set_overlay_size(Size::new(-5.0, 40.0));
    let config = OverlayConfiguration::new()
        .with_arrow_alignment(understory_overlay::ArrowAlignment::Start);
    host.present("tip", config, ANCHOR);

    let state = host.state();
    assert_eq!(state.resolved_position, Some(Point::new(125.0, 276.0)));
    assert_eq!(state.overlay_rect, Some(Rect::new(65.0, 256.0, 185.0, 296.0)));
    assert_eq!(state.arrow_offset, Some(12.0));
    assert_eq!(host.session().map(|s| s.overlay_size()), Some(Size::new(120.0, 40.0)));

    // Also ignored while a session is live.
    let revision = host.revision();
    host.set_overlay_size(Size::new(f64::NAN, f64::NAN));
    assert_eq!(host.revision(), revision);
    assert_eq!(host.state(), state);
}

#[test]
fn configuration_round_trips_through_the_session() {
    let config = OverlayConfiguration::new()
        .with_side(Side::Top)
        .with_gap(10.0)
        .with_max_width(80.0)
        .with_backdrop_opacity(0.4)
        .with_auto_dismiss(Duration::from_secs(2))
        .with_style("dark");
    let mut host: OverlayHost<&'static str, &'static str> = OverlayHost::new();
    host.present("tip", config.clone(), ANCHOR);

    let session = host.session().expect("session is live");
    assert_eq!(session.configuration(), &config);
    assert_eq!(*session.configuration().style(), "dark");
}

#[test]
fn auto_dismiss_fires_after_presentation() {
    let log = Log::default();
    let mut host = host();
    let config = OverlayConfiguration::new().with_auto_dismiss(Duration::from_millis(1000));
    host.present_with("toast", config, ANCHOR, record(&log));

    host.advance(300);
    assert_eq!(host.phase(), Phase::Presented);
    assert_eq!(host.next_deadline(), Some(1300));

    host.advance(1299);
    assert_eq!(host.phase(), Phase::Presented);
    host.advance(1300);
    assert_eq!(host.phase(), Phase::Exiting);
    assert_eq!(log.borrow()[0].reason, DismissReason::AutoDismiss);
}

#[test]
fn auto_dismiss_of_a_replaced_session_does_not_touch_its_successor() {
    let mut host = host();
    let config = OverlayConfiguration::new().with_auto_dismiss(Duration::from_millis(1000));
    host.present("first", config, ANCHOR);
    host.advance(300);

    host.advance(500);
    let second = host.present("second", OverlayConfiguration::new(), ANCHOR);
    host.advance(800);
    assert_eq!(host.phase(), Phase::Presented);

    // The first session's auto-dismiss deadline passes.
    host.advance(1300);
    assert_eq!(host.phase(), Phase::Presented);
    assert_eq!(host.current_sequence(), Some(second));
}

#[test]
fn entry_waits_for_a_container_size() {
    let mut host: OverlayHost<&'static str> = OverlayHost::new();
    host.set_overlay_size(Size::new(120.0, 40.0));
    host.present("tip", OverlayConfiguration::new(), ANCHOR);

    let state = host.state();
    assert_eq!(state.phase, Phase::Entering);
    assert_eq!(state.resolved_position, None);
    assert_eq!(state.appearance, Appearance::HIDDEN);
    assert!(host.session().is_some_and(|s| s.is_awaiting_layout()));

    host.advance(1000);
    assert_eq!(host.phase(), Phase::Entering);
    assert_eq!(host.next_deadline(), None);

    host.set_container_size(Size::new(300.0, 600.0));
    let state = host.state();
    assert_eq!(state.resolved_position, Some(Point::new(125.0, 276.0)));
    assert_eq!(state.appearance.opacity, 1.0);
    assert_eq!(host.next_deadline(), Some(1300));

    host.advance(1300);
    assert_eq!(host.phase(), Phase::Presented);
}

#[test]
fn entry_waits_for_a_valid_anchor() {
    let mut host = host();
    host.present("tip", OverlayConfiguration::new(), Rect::ZERO);
    assert_eq!(host.state().appearance, Appearance::HIDDEN);
    host.advance(500);
    assert_eq!(host.phase(), Phase::Entering);

    assert!(host.update_anchor(ANCHOR));
    host.advance(800);
    assert_eq!(host.phase(), Phase::Presented);
}

#[test]
fn reduced_motion_shortens_transitions() {
    let mut host = host();
    host.set_reduced_motion(true);
    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    host.advance(119);
    assert_eq!(host.phase(), Phase::Entering);
    host.advance(120);
    assert_eq!(host.phase(), Phase::Presented);

    host.dismiss();
    host.advance(240);
    assert_eq!(host.phase(), Phase::Idle);
}

#[test]
fn taps_are_routed_by_overlay_bounds() {
    let mut host = host();
    assert_eq!(host.handle_tap(Point::new(10.0, 10.0)), TapOutcome::PassThrough);

    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    host.advance(300);
    assert_eq!(host.handle_tap(Point::new(125.0, 276.0)), TapOutcome::Content);
    assert_eq!(host.phase(), Phase::Presented);

    assert_eq!(host.handle_tap(Point::new(10.0, 10.0)), TapOutcome::Dismissed);
    assert_eq!(host.phase(), Phase::Exiting);
    // Exiting overlays no longer claim taps.
    assert_eq!(host.handle_tap(Point::new(125.0, 276.0)), TapOutcome::PassThrough);
}

#[test]
fn outside_taps_can_be_disabled() {
    let mut host = host();
    let config = OverlayConfiguration::new().with_dismiss_on_outside_tap(false);
    host.present("tip", config, ANCHOR);
    assert_eq!(host.handle_tap(Point::new(10.0, 10.0)), TapOutcome::PassThrough);
    assert_eq!(host.phase(), Phase::Entering);
}

#[test]
fn exiting_keeps_content_until_the_animation_ends() {
    let mut host = host();
    host.present("tip", OverlayConfiguration::new(), ANCHOR);
    host.advance(300);
    host.dismiss();

    let state = host.state();
    assert_eq!(state.phase, Phase::Exiting);
    assert!(!state.is_presented);
    assert_eq!(state.appearance.opacity, 0.0);
    assert_eq!(host.session().map(|s| *s.content()), Some("tip"));

    // Late anchor updates are not accepted while exiting.
    assert!(!host.update_anchor(ANCHOR));
}
