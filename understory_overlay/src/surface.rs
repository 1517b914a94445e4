// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositing overlays above normal content.
//!
//! Two delivery modes are supported behind the [`OverlaySurface`] trait:
//!
//! - [`LayeredSurface`]: a layer above normal content in the same surface.
//!   Pointer-capable platforms use this. Hits outside the overlay go to the
//!   backdrop.
//! - [`TopmostSurface`]: a dedicated, transparent, always-on-top surface,
//!   for touch platforms where an overlay must render above transient system
//!   UI such as modal sheets. It is created lazily on first show and only
//!   hidden afterwards, never destroyed. Every touch outside the overlay's
//!   content passes through.
//!
//! [`RenderCompositor`] keeps a surface's visibility in step with an
//! [`OverlayState`].

use kurbo::{Point, Rect};
use tracing::debug;

use crate::host::OverlayState;
use crate::phase::Phase;

/// How an overlay is composited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceMode {
    /// A layer above normal content within the same surface.
    Layered,
    /// A dedicated always-on-top surface with pass-through hit testing.
    Topmost,
}

/// Input capabilities of the platform.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlatformCapabilities {
    /// A hovering pointer (mouse, trackpad) is available.
    pub pointer: bool,
    /// Touch input is available.
    pub touch: bool,
}

impl SurfaceMode {
    /// Picks a mode for an overlay family.
    ///
    /// `needs_topmost` marks families that must render above transient system
    /// UI. Only touch-only platforms get a dedicated surface; everything else
    /// is layered.
    #[must_use]
    pub fn select(capabilities: PlatformCapabilities, needs_topmost: bool) -> Self {
        if needs_topmost && capabilities.touch && !capabilities.pointer {
            Self::Topmost
        } else {
            Self::Layered
        }
    }
}

/// Who receives a hit at a given point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// The overlay's content.
    Overlay,
    /// The backdrop behind the overlay (outside-tap handling).
    Backdrop,
    /// Nothing on the overlay surface; deliver to the content below.
    PassThrough,
}

/// A place overlays can be painted.
pub trait OverlaySurface {
    /// The delivery mode this surface implements.
    fn mode(&self) -> SurfaceMode;

    /// Makes the surface visible.
    fn show(&mut self);

    /// Hides the surface.
    fn hide(&mut self);

    /// Returns `true` while visible.
    fn is_visible(&self) -> bool;

    /// Decides who receives a hit at `point` given the overlay's bounds.
    fn hit_test(&self, point: Point, overlay_rect: Option<Rect>) -> HitTarget;
}

/// Overlay-layer mode: a layer within the normal surface.
#[derive(Clone, Debug, Default)]
pub struct LayeredSurface {
    visible: bool,
}

impl LayeredSurface {
    /// Creates a hidden layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlaySurface for LayeredSurface {
    fn mode(&self) -> SurfaceMode {
        SurfaceMode::Layered
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn hit_test(&self, point: Point, overlay_rect: Option<Rect>) -> HitTarget {
        if !self.visible {
            HitTarget::PassThrough
        } else if overlay_rect.is_some_and(|r| r.contains(point)) {
            HitTarget::Overlay
        } else {
            HitTarget::Backdrop
        }
    }
}

/// Platform hooks for creating and toggling a top-level surface.
pub trait SurfaceBackend {
    /// Platform handle for a created surface.
    type Handle;

    /// Creates a transparent, always-on-top surface.
    fn create(&mut self) -> Self::Handle;

    /// Shows or hides a previously created surface.
    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);
}

/// Top-level-surface mode: a lazily created, never destroyed top surface.
#[derive(Debug)]
pub struct TopmostSurface<B: SurfaceBackend> {
    backend: B,
    handle: Option<B::Handle>,
    visible: bool,
}

impl<B: SurfaceBackend> TopmostSurface<B> {
    /// Wraps `backend`; no surface is created until the first show.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handle: None,
            visible: false,
        }
    }

    /// Returns `true` once the platform surface exists.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.handle.is_some()
    }

    /// The platform backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SurfaceBackend> OverlaySurface for TopmostSurface<B> {
    fn mode(&self) -> SurfaceMode {
        SurfaceMode::Topmost
    }

    fn show(&mut self) {
        if self.visible {
            return;
        }
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => {
                debug!("creating topmost overlay surface");
                self.backend.create()
            }
        };
        self.backend.set_visible(&handle, true);
        self.handle = Some(handle);
        self.visible = true;
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        if let Some(handle) = &self.handle {
            self.backend.set_visible(handle, false);
        }
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn hit_test(&self, point: Point, overlay_rect: Option<Rect>) -> HitTarget {
        if self.visible && overlay_rect.is_some_and(|r| r.contains(point)) {
            HitTarget::Overlay
        } else {
            HitTarget::PassThrough
        }
    }
}

/// Keeps an [`OverlaySurface`] visible exactly while an overlay is live.
///
/// The surface is shown as soon as a session enters and hidden only once the
/// phase reaches [`Phase::Idle`], after the exit animation has finished.
#[derive(Debug)]
pub struct RenderCompositor<S> {
    surface: S,
    last_phase: Phase,
    overlay_rect: Option<Rect>,
}

impl<S: OverlaySurface> RenderCompositor<S> {
    /// Wraps `surface`.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            last_phase: Phase::Idle,
            overlay_rect: None,
        }
    }

    /// Applies a host state snapshot to the surface.
    pub fn sync(&mut self, state: &OverlayState) {
        if state.phase.is_visible() {
            if !self.surface.is_visible() {
                self.surface.show();
            }
        } else if self.surface.is_visible() {
            self.surface.hide();
        }
        self.last_phase = state.phase;
        self.overlay_rect = state.overlay_rect;
    }

    /// Routes a hit using the bounds from the last [`sync`](Self::sync).
    #[must_use]
    pub fn hit_test(&self, point: Point) -> HitTarget {
        self.surface.hit_test(point, self.overlay_rect)
    }

    /// Phase seen at the last sync.
    #[must_use]
    pub fn last_phase(&self) -> Phase {
        self.last_phase
    }

    /// The wrapped surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The wrapped surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
