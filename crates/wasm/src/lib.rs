#![deny(unsafe_code)]
//! Browser bindings for the electric-border effect.
//!
//! JavaScript owns the event loop: it forwards `requestAnimationFrame`
//! timestamps into an `ElectricBorder` and after each call asks for the
//! frame id to schedule next. Visibility and size come either from
//! observers the border attaches to its host element or from JS calling the
//! setters directly. Handles minted here are plain counters so the
//! scheduling side stays testable off the browser.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{CanvasSurface, ElectricBorder};

use electric_border_core::{BorderError, BorderStyle, FrameHandle, FrameScheduler};
use serde_json::Value;

/// Scheduler whose frames are fired by JavaScript.
///
/// `request_frame` only mints an id; the JS side polls the controller's
/// pending frame and wraps it in `requestAnimationFrame`. Cancelled ids are
/// queued so JS can drop callbacks it already registered.
#[derive(Debug, Default)]
pub struct HostScheduler {
    next_id: u64,
    cancelled: Vec<FrameHandle>,
}

impl HostScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the ids cancelled since the last call.
    pub fn take_cancelled(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.cancelled)
    }
}

impl FrameScheduler for HostScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        FrameHandle::new(self.next_id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

/// Parses a style from JS. A blank string keeps `base`; otherwise the JSON
/// object is overlaid on it.
pub fn parse_style(base: &BorderStyle, json: &str) -> Result<BorderStyle, BorderError> {
    if json.trim().is_empty() {
        return Ok(*base);
    }
    let value: Value = serde_json::from_str(json)
        .map_err(|e| BorderError::InvalidStyle(e.to_string()))?;
    if !value.is_object() {
        return Err(BorderError::InvalidStyle("expected a JSON object".into()));
    }
    base.merged_with(&value)
}

/// Frame ids cross the JS boundary as numbers; anything that is not a
/// positive integer cannot be one we minted.
pub fn handle_from_js(id: f64) -> Option<FrameHandle> {
    if id.is_finite() && id >= 1.0 && id.fract() == 0.0 && id <= u64::MAX as f64 {
        Some(FrameHandle::new(id as u64))
    } else {
        None
    }
}

/// CSS color string for a canvas stroke.
pub fn css_color(style: &BorderStyle) -> String {
    style.color.to_hex()
}
