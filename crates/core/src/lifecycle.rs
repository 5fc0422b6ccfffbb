//! Lifecycle controller: visibility, resize, frame scheduling and teardown.
//!
//! State machine:
//!
//! ```text
//! Uninitialized -> Idle <-> Running
//!        \          |         |
//!         +------> TornDown <-+
//! ```
//!
//! `Running` requires the host to be visible, sized, and backed by a drawing
//! surface. At most one frame is pending at any time; leaving `Running`
//! cancels it before anything else changes. `TornDown` is terminal.

use crate::clock::AnimationClock;
use crate::frame::{step_frame, Frame};
use crate::scheduler::{FrameHandle, FrameScheduler, ManualScheduler, Subscription};
use crate::settings::BorderSettings;
use crate::style::BorderStyle;
use crate::surface::{DrawSurface, StrokeStyle, SurfaceDimensions};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, no host events seen yet.
    Uninitialized,
    /// Invisible, unsized, or without a surface. No frames scheduled.
    Idle,
    /// Exactly one frame pending at all times.
    Running,
    /// Unmounted. Every event is ignored.
    TornDown,
}

/// Owns one border instance: its clock, surface, scheduler and observers.
///
/// Host glue forwards observer callbacks to [`on_visibility_changed`] and
/// [`on_resized`], and scheduled callbacks to [`on_frame`]. Dropping the
/// controller tears it down.
///
/// [`on_visibility_changed`]: BorderController::on_visibility_changed
/// [`on_resized`]: BorderController::on_resized
/// [`on_frame`]: BorderController::on_frame
pub struct BorderController<S: FrameScheduler, D: DrawSurface> {
    style: BorderStyle,
    settings: BorderSettings,
    scheduler: S,
    surface: Option<D>,
    subscriptions: Vec<Box<dyn Subscription>>,
    state: LifecycleState,
    visible: bool,
    host_size: (f64, f64),
    device_pixel_ratio: f64,
    dims: Option<SurfaceDimensions>,
    clock: AnimationClock,
    pending: Option<FrameHandle>,
    frames_drawn: u64,
}

impl<S: FrameScheduler, D: DrawSurface> BorderController<S, D> {
    /// Creates an idle-to-be controller.
    ///
    /// `surface` is `None` when the host could not provide a 2D context; the
    /// controller then stays out of `Running` and draws nothing.
    pub fn new(style: BorderStyle, settings: BorderSettings, scheduler: S, surface: Option<D>) -> Self {
        if surface.is_none() {
            warn!("no 2D drawing surface available; border will not render");
        }
        Self {
            style: style.normalized(),
            settings,
            scheduler,
            surface,
            subscriptions: Vec::new(),
            state: LifecycleState::Uninitialized,
            visible: false,
            host_size: (0.0, 0.0),
            device_pixel_ratio: 1.0,
            dims: None,
            clock: AnimationClock::new(),
            pending: None,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current surface dimensions, `None` while the host box is empty.
    pub fn dimensions(&self) -> Option<SurfaceDimensions> {
        self.dims
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    pub fn style(&self) -> &BorderStyle {
        &self.style
    }

    pub fn settings(&self) -> &BorderSettings {
        &self.settings
    }

    /// Number of frames actually drawn since creation.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// The outstanding frame callback, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Host glue uses this to drain scheduler-side bookkeeping; requesting or
    /// cancelling frames directly bypasses the controller.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    /// Number of host observers currently owned.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Hands a host observer to the controller; it is disconnected on
    /// teardown. Subscriptions offered after teardown are disconnected at once.
    pub fn observe(&mut self, mut subscription: Box<dyn Subscription>) {
        if self.state == LifecycleState::TornDown {
            subscription.disconnect();
            return;
        }
        self.subscriptions.push(subscription);
    }

    /// Replaces the style. Takes effect on the next frame with no easing;
    /// the clock keeps running.
    pub fn set_style(&mut self, style: BorderStyle) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        self.style = style.normalized();
    }

    /// Replaces the tuning constants and re-derives the surface size, since
    /// the margin and DPR cap live there.
    pub fn set_settings(&mut self, settings: BorderSettings) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        self.settings = settings;
        if self.state != LifecycleState::Uninitialized {
            self.refresh_dimensions();
        }
    }

    /// Host visibility callback. Showing starts the loop (once); hiding
    /// cancels the pending frame and schedules nothing further.
    pub fn on_visibility_changed(&mut self, visible: bool) {
        if self.state == LifecycleState::TornDown {
            trace!(visible, "visibility change after teardown ignored");
            return;
        }
        self.visible = visible;
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Host resize callback with the host box size in logical pixels.
    ///
    /// Swaps the dimensions read by the next frame without touching the
    /// clock. An empty box pauses rendering until a usable size arrives.
    pub fn on_resized(&mut self, width: f64, height: f64) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        self.host_size = (width, height);
        if self.state == LifecycleState::Uninitialized {
            self.state = LifecycleState::Idle;
        }
        self.refresh_dimensions();
    }

    /// Host device-pixel-ratio change; handled like a resize.
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        self.device_pixel_ratio = device_pixel_ratio;
        if self.state != LifecycleState::Uninitialized {
            self.refresh_dimensions();
        }
    }

    /// Runs the frame for `handle` at host time `timestamp_ms`.
    ///
    /// Returns `None` without side effects when `handle` is not the pending
    /// frame (cancelled, stale, or after teardown). Otherwise draws the frame,
    /// schedules the next one and returns what was drawn.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> Option<Frame> {
        if self.state != LifecycleState::Running || self.pending != Some(handle) {
            trace!(handle = handle.id(), state = ?self.state, "stale frame callback ignored");
            return None;
        }
        self.pending = None;

        let Some(dims) = self.dims else {
            self.stop();
            return None;
        };
        let (clock, frame) = step_frame(self.clock, timestamp_ms, &dims, &self.style, &self.settings);
        self.clock = clock;

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            surface.stroke_closed_path(
                &frame.points,
                &StrokeStyle {
                    color: self.style.color,
                    line_width: self.settings.render.line_width,
                },
            );
        }
        self.frames_drawn += 1;
        self.pending = Some(self.scheduler.request_frame());
        Some(frame)
    }

    /// Unmount: cancels the pending frame, disconnects every observer and
    /// enters `TornDown`. Idempotent.
    pub fn teardown(&mut self) {
        if self.state == LifecycleState::TornDown {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        for mut subscription in self.subscriptions.drain(..) {
            subscription.disconnect();
        }
        self.visible = false;
        self.state = LifecycleState::TornDown;
        debug!(frames = self.frames_drawn, "border torn down");
    }

    fn start(&mut self) {
        if self.state == LifecycleState::Running {
            return;
        }
        if self.surface.is_none() || self.dims.is_none() {
            debug!(
                has_surface = self.surface.is_some(),
                "border visible but not ready; staying idle"
            );
            self.state = LifecycleState::Idle;
            return;
        }
        self.state = LifecycleState::Running;
        self.pending = Some(self.scheduler.request_frame());
        debug!("border animation running");
    }

    fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == LifecycleState::Running {
            debug!("border animation paused");
        }
        self.state = LifecycleState::Idle;
    }

    fn refresh_dimensions(&mut self) {
        let (width, height) = self.host_size;
        self.dims = SurfaceDimensions::from_host(
            width,
            height,
            self.device_pixel_ratio,
            &self.settings.render,
        );
        match self.dims {
            Some(dims) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.configure(&dims);
                }
                if self.visible {
                    self.start();
                }
            }
            None => {
                debug!(width, height, "host box empty; surface not ready");
                if self.state == LifecycleState::Running {
                    self.stop();
                }
            }
        }
    }
}

impl<D: DrawSurface> BorderController<ManualScheduler, D> {
    /// Fires every pending frame at `timestamp_ms`, returning the last frame
    /// drawn.
    pub fn pump(&mut self, timestamp_ms: f64) -> Option<Frame> {
        let handles = self.scheduler.take_pending();
        let mut last = None;
        for handle in handles {
            if let Some(frame) = self.on_frame(handle, timestamp_ms) {
                last = Some(frame);
            }
        }
        last
    }
}

impl<S: FrameScheduler, D: DrawSurface> Drop for BorderController<S, D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
