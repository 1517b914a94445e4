// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor observation: turn per-layout readings into change notifications.
//!
//! The host UI tree reports a trigger's global rectangle on every layout pass.
//! [`AnchorObserver`] filters those readings down to the ones that changed,
//! so an [`OverlayHost`](crate::OverlayHost) only re-resolves placement when
//! it has to.
//!
//! ```
//! use kurbo::Rect;
//! use understory_overlay::anchor::AnchorObserver;
//!
//! let mut observer = AnchorObserver::new();
//! let rect = Rect::new(10.0, 10.0, 60.0, 40.0);
//! assert_eq!(observer.observe(rect), Some(rect));
//! // Same rectangle on the next layout pass: nothing to report.
//! assert_eq!(observer.observe(rect), None);
//! ```

use kurbo::Rect;

/// Something that can report a trigger element's global rectangle.
///
/// Returns `None` when the element is not currently laid out.
pub trait AnchorSource {
    /// The element's current rectangle in the shared global coordinate space.
    fn anchor_rect(&self) -> Option<Rect>;
}

impl<F: Fn() -> Option<Rect>> AnchorSource for F {
    fn anchor_rect(&self) -> Option<Rect> {
        self()
    }
}

/// Emits an anchor rectangle only when it differs from the previous reading.
///
/// Zero-size rectangles (elements not yet laid out) are emitted like any
/// other change; [`OverlayHost::update_anchor`](crate::OverlayHost::update_anchor)
/// decides whether they are usable.
#[derive(Clone, Debug, Default)]
pub struct AnchorObserver {
    last: Option<Rect>,
    tolerance: f64,
}

impl AnchorObserver {
    /// Creates an observer that reports any change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer that ignores edge movements up to `tolerance`.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            last: None,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Records a reading, returning it if it differs from the previous one.
    pub fn observe(&mut self, rect: Rect) -> Option<Rect> {
        if self.last.is_some_and(|last| self.same(last, rect)) {
            return None;
        }
        self.last = Some(rect);
        Some(rect)
    }

    /// Reads `source` and records the result.
    ///
    /// An element that is not laid out produces no emission and leaves the
    /// previous reading in place.
    pub fn poll<A: AnchorSource + ?Sized>(&mut self, source: &A) -> Option<Rect> {
        source.anchor_rect().and_then(|rect| self.observe(rect))
    }

    /// The most recent reading.
    #[must_use]
    pub fn last(&self) -> Option<Rect> {
        self.last
    }

    /// Forgets the previous reading so the next one is always emitted.
    pub fn reset(&mut self) {
        self.last = None;
    }

    fn same(&self, a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() <= self.tolerance
            && (a.y0 - b.y0).abs() <= self.tolerance
            && (a.x1 - b.x1).abs() <= self.tolerance
            && (a.y1 - b.y1).abs() <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_changes() {
        let mut o = AnchorObserver::new();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 15.0, 10.0);
        assert_eq!(o.observe(a), Some(a));
        assert_eq!(o.observe(a), None);
        assert_eq!(o.observe(b), Some(b));
        assert_eq!(o.last(), Some(b));
    }

    #[test]
    fn tolerance_suppresses_jitter() {
        let mut o = AnchorObserver::with_tolerance(0.5);
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        o.observe(a);
        assert_eq!(o.observe(Rect::new(0.25, 0.0, 10.25, 10.0)), None);
        assert!(o.observe(Rect::new(1.0, 0.0, 11.0, 10.0)).is_some());
    }

    #[test]
    fn zero_size_is_still_reported() {
        let mut o = AnchorObserver::new();
        assert_eq!(o.observe(Rect::ZERO), Some(Rect::ZERO));
    }

    #[test]
    fn poll_reads_source() {
        let mut o = AnchorObserver::new();
        let laid_out = || Some(Rect::new(1.0, 2.0, 3.0, 4.0));
        let detached = || -> Option<Rect> { None };
        assert!(o.poll(&laid_out).is_some());
        assert_eq!(o.poll(&detached), None);
        assert_eq!(o.last(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn reset_forces_emission() {
        let mut o = AnchorObserver::new();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        o.observe(a);
        o.reset();
        assert_eq!(o.observe(a), Some(a));
    }
}
