//! User-facing border configuration and named presets.

use crate::color::Srgba;
use crate::error::BorderError;
use crate::params::{param_f64, param_f64_any, param_str};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default stroke color, a mid blue (`#3b82f6`).
pub const DEFAULT_COLOR: Srgba = Srgba {
    r: 0x3b as f64 / 255.0,
    g: 0x82 as f64 / 255.0,
    b: 0xf6 as f64 / 255.0,
    a: 1.0,
};
/// Default multiplier on elapsed-time accumulation.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Default noise amplitude.
pub const DEFAULT_CHAOS: f64 = 0.12;
/// Default corner radius of the undisplaced contour, in logical pixels.
pub const DEFAULT_BORDER_RADIUS: f64 = 24.0;

const PRESET_NAMES: &[&str] = &["default", "contact", "card", "warning", "skills"];

/// Style of one animated border.
///
/// The bordered child content is owned by the host layout; the engine only
/// ever sees its bounding box through resize events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    /// Stroke color, passed through to the drawing surface.
    pub color: Srgba,
    /// `0` freezes the noise phase.
    pub speed: f64,
    /// Noise amplitude; `0` draws a perfectly smooth rounded rectangle.
    pub chaos: f64,
    /// Silently clamped to half the shorter side at draw time.
    #[serde(alias = "borderRadius")]
    pub border_radius: f64,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            speed: DEFAULT_SPEED,
            chaos: DEFAULT_CHAOS,
            border_radius: DEFAULT_BORDER_RADIUS,
        }
    }
}

impl BorderStyle {
    /// Builds a style from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    ///
    /// Returns `BorderError::InvalidColor` only when `color` is a string that
    /// does not parse.
    pub fn from_json(params: &Value) -> Result<Self, BorderError> {
        Self::default().merged_with(params)
    }

    /// Overlays the keys present in `params` on top of `self`.
    ///
    /// Accepts both `border_radius` and `borderRadius`.
    pub fn merged_with(&self, params: &Value) -> Result<Self, BorderError> {
        let color = match param_str(params, "color") {
            Some(hex) => Srgba::from_hex(hex)?,
            None => self.color,
        };
        Ok(Self {
            color,
            speed: param_f64(params, "speed", self.speed),
            chaos: param_f64(params, "chaos", self.chaos),
            border_radius: param_f64_any(
                params,
                &["border_radius", "borderRadius"],
                self.border_radius,
            ),
        }
        .normalized())
    }

    /// Replaces non-finite numbers with their defaults and negative radii
    /// with zero, so a frame never sees NaN.
    pub fn normalized(self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            color: self.color,
            speed: finite_or(self.speed, DEFAULT_SPEED),
            chaos: finite_or(self.chaos, DEFAULT_CHAOS),
            border_radius: finite_or(self.border_radius, DEFAULT_BORDER_RADIUS).max(0.0),
        }
    }

    /// Looks up a named preset.
    ///
    /// Returns `BorderError::UnknownPreset` for names not in [`BorderStyle::list_presets`].
    pub fn preset(name: &str) -> Result<Self, BorderError> {
        let base = Self::default();
        match name {
            "default" => Ok(base),
            "contact" => Ok(Self {
                speed: 0.5,
                chaos: 0.05,
                border_radius: 32.0,
                ..base
            }),
            "card" => Ok(Self {
                speed: 0.7,
                chaos: 0.1,
                ..base
            }),
            "warning" => Ok(Self {
                color: Srgba::rgb8(0xef, 0x44, 0x44),
                speed: 1.5,
                chaos: 0.3,
                ..base
            }),
            "skills" => Ok(Self {
                speed: 0.4,
                chaos: 0.06,
                border_radius: 32.0,
                ..base
            }),
            _ => Err(BorderError::UnknownPreset(name.to_string())),
        }
    }

    /// Names accepted by [`BorderStyle::preset`].
    pub fn list_presets() -> &'static [&'static str] {
        PRESET_NAMES
    }
}
