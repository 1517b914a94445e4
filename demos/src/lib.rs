// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the overlay demos.

use tracing_subscriber::EnvFilter;
use understory_overlay::{OverlayHost, OverlayState};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `debug`
/// for the overlay crate so phase transitions are visible.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("understory_overlay=debug"));
    // A second demo in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// One-line summary of a render snapshot.
pub fn describe(state: &OverlayState) -> String {
    let position = state
        .resolved_position
        .map_or_else(|| "unplaced".to_string(), |p| format!("({:.1}, {:.1})", p.x, p.y));
    format!(
        "{:?} at {position}, opacity {:.2}, scale {:.2}",
        state.phase, state.appearance.opacity, state.appearance.scale,
    )
}

/// Advances `host` to `now` and prints the snapshot if anything changed.
pub fn step<C, S>(host: &mut OverlayHost<C, S>, now: u64) {
    let before = host.revision();
    host.advance(now);
    if host.revision() != before {
        println!("t={now:>5}ms  {}", describe(&host.state()));
    }
}
