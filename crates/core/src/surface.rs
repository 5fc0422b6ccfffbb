//! Drawing-surface abstraction and backing-store sizing.
//!
//! The engine draws exactly one thing per frame: a closed polyline. Any host
//! that can clear a 2D surface and stroke a path can implement
//! [`DrawSurface`]; a browser canvas and a CPU raster buffer are the two in
//! this workspace.

use crate::color::Srgba;
use crate::contour::RoundedRect;
use crate::settings::RenderSettings;
use glam::DVec2;

/// Logical size of the drawing surface and its device pixel ratio.
///
/// `width`/`height` include the outward `border_offset` margin on each side
/// of the host box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDimensions {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
    pub border_offset: f64,
}

impl SurfaceDimensions {
    /// Sizes the surface around a host box of `host_width` x `host_height`.
    ///
    /// Returns `None` while the host box is empty or not finite: such a host
    /// is "not ready" rather than an error. The device pixel ratio falls back
    /// to 1 when unusable and is capped at `settings.max_device_pixel_ratio`.
    pub fn from_host(
        host_width: f64,
        host_height: f64,
        device_pixel_ratio: f64,
        settings: &RenderSettings,
    ) -> Option<Self> {
        let ready = |v: f64| v.is_finite() && v > 0.0;
        if !ready(host_width) || !ready(host_height) {
            return None;
        }
        let offset = if settings.border_offset.is_finite() {
            settings.border_offset.max(0.0)
        } else {
            0.0
        };
        let dpr = if ready(device_pixel_ratio) {
            device_pixel_ratio
        } else {
            1.0
        };
        let cap = if ready(settings.max_device_pixel_ratio) {
            settings.max_device_pixel_ratio
        } else {
            1.0
        };
        Some(Self {
            width: host_width + offset * 2.0,
            height: host_height + offset * 2.0,
            device_pixel_ratio: dpr.min(cap),
            border_offset: offset,
        })
    }

    /// Backing-store resolution in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let px = |v: f64| (v * self.device_pixel_ratio).ceil().clamp(0.0, u32::MAX as f64) as u32;
        (px(self.width), px(self.height))
    }

    /// The host box inside the margin, with the requested corner radius
    /// (clamped by [`RoundedRect::new`]).
    pub fn content_rect(&self, border_radius: f64) -> RoundedRect {
        RoundedRect::new(
            self.border_offset,
            self.border_offset,
            self.width - 2.0 * self.border_offset,
            self.height - 2.0 * self.border_offset,
            border_radius,
        )
    }

    /// True when `p` is inside the logical surface.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// How the outline is stroked. Joins and caps are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Srgba,
    /// Width in logical pixels.
    pub line_width: f64,
}

/// A host 2D drawing surface.
pub trait DrawSurface {
    /// Resizes the backing store to [`SurfaceDimensions::backing_size`] and
    /// sets the logical-to-device scale. Must not touch animation state.
    fn configure(&mut self, dims: &SurfaceDimensions);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    /// Strokes a closed polyline through `points` (logical coordinates);
    /// the last point connects back to the first.
    fn stroke_closed_path(&mut self, points: &[DVec2], stroke: &StrokeStyle);
}
