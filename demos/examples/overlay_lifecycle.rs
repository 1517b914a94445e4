// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay lifecycle walkthrough.
//!
//! Presents a tooltip, supersedes it with a second one while it is still
//! entering, lets an auto-dismissing toast expire, and dismisses a sidebar with
//! a drag. Run with `RUST_LOG=understory_overlay=trace` to also see dropped
//! stale timers.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlay_lifecycle`

use std::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_demos::{describe, init_logging, step};
use understory_event_state::drag::DragState;
use understory_overlay::surface::{LayeredSurface, OverlaySurface, RenderCompositor};
use understory_overlay::{OverlayConfiguration, OverlayHost, Side, TapOutcome};

fn main() {
    init_logging();

    let mut host: OverlayHost<&'static str> = OverlayHost::new();
    let mut compositor = RenderCompositor::new(LayeredSurface::new());
    host.set_container_size(Size::new(390.0, 844.0));
    host.set_overlay_size(Size::new(160.0, 44.0));

    println!("== supersede while entering ==");
    let save = Rect::new(20.0, 60.0, 68.0, 92.0);
    let share = Rect::new(330.0, 60.0, 378.0, 92.0);
    let first = host.present_with("Save", OverlayConfiguration::new(), save, |e| {
        println!("  first session closed: {:?}", e.reason);
    });
    step(&mut host, 100);
    host.present("Share", OverlayConfiguration::new(), share);
    println!("  stale completion applied: {}", host.complete_transition(first));
    for t in [300, 400] {
        step(&mut host, t);
    }
    compositor.sync(&host.state());
    println!("  tap on overlay: {:?}", host.handle_tap(Point::new(290.0, 120.0)));
    assert_eq!(host.handle_tap(Point::new(10.0, 800.0)), TapOutcome::Dismissed);
    step(&mut host, 600);
    compositor.sync(&host.state());
    println!(
        "  surface visible after exit: {}",
        compositor.surface().is_visible()
    );

    println!("== auto-dismiss ==");
    let toast = OverlayConfiguration::new()
        .with_side(Side::Top)
        .with_auto_dismiss(Duration::from_millis(1500));
    host.present("Copied", toast, Rect::new(150.0, 780.0, 240.0, 820.0));
    for t in [900, 1000, 2400, 2500, 2700] {
        step(&mut host, t);
    }

    println!("== drag to dismiss ==");
    host.set_overlay_size(Size::new(280.0, 844.0));
    let sidebar = OverlayConfiguration::new()
        .with_side(Side::Leading)
        .with_backdrop_opacity(0.4)
        .with_drag_to_dismiss(true);
    host.present("Sidebar", sidebar, Rect::new(300.0, 0.0, 390.0, 844.0));
    step(&mut host, 3000);

    let mut drag = DragState::default();
    drag.start(Point::new(250.0, 400.0), 3100);
    for (i, x) in [230.0, 200.0, 160.0, 120.0].into_iter().enumerate() {
        let pos = Point::new(x, 400.0);
        drag.update(pos, 3100 + 16 * (i as u64 + 1));
        if let Some(offset) = drag.total_offset(pos) {
            host.drag_changed(offset.x);
            println!("  dragging: {}", describe(&host.state()));
        }
    }
    if let Some(release) = drag.finish(Point::new(110.0, 400.0), 3180) {
        println!("  release: {:?}", host.drag_released(release));
    }
    step(&mut host, 3400);
}
