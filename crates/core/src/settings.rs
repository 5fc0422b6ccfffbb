//! Tuning constants of the border engine.
//!
//! These are not user-facing style (see [`crate::style::BorderStyle`]); the
//! defaults keep per-frame cost low enough for several borders on screen at
//! once. Hosts may still override them, e.g. for offline rendering.

use crate::noise_field::FractalNoise;
use crate::params::{param_f64, param_u32};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fractal noise shape shared by both displacement axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    pub frequency: f64,
    pub flatness: f64,
    /// Multiplier from contour fraction to noise position. One trip around
    /// the contour covers this many noise units.
    pub contour_stretch: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            octaves: 6,
            lacunarity: 1.6,
            gain: 0.7,
            frequency: 8.0,
            flatness: 0.0,
            contour_stretch: 6.0,
        }
    }
}

impl NoiseSettings {
    /// Fractal sum with the given amplitude (the style's chaos).
    pub fn fractal(&self, amplitude: f64) -> FractalNoise {
        FractalNoise {
            octaves: self.octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            amplitude,
            frequency: self.frequency,
            flatness: self.flatness,
        }
    }
}

/// Which perimeter drives the per-frame sample count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerimeterEstimate {
    /// True rounded-rectangle arc length.
    #[default]
    Exact,
    /// `2 (w + h) + 2 pi r`, denser sampling that matches the legacy look.
    Bounding,
}

/// Geometry, stroke and timing constants of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Logical pixels of displacement per unit of noise.
    pub displacement_scale: f64,
    /// Margin added around the host box on every side so the noisy outline
    /// is never clipped.
    pub border_offset: f64,
    pub line_width: f64,
    /// Target spacing between samples along the contour, in logical pixels.
    pub sample_spacing: f64,
    /// Longest frame delta, in seconds, that may advance the clock.
    pub max_frame_delta: f64,
    pub max_device_pixel_ratio: f64,
    pub perimeter: PerimeterEstimate,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            displacement_scale: 50.0,
            border_offset: 60.0,
            line_width: 1.2,
            sample_spacing: 4.0,
            max_frame_delta: 0.1,
            max_device_pixel_ratio: 2.0,
            perimeter: PerimeterEstimate::Exact,
        }
    }
}

/// Everything besides style that shapes a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSettings {
    pub noise: NoiseSettings,
    pub render: RenderSettings,
}

impl BorderSettings {
    /// Overlays the keys present in `params` (flat object) on `self`.
    ///
    /// Unknown or mistyped keys are ignored; `perimeter` accepts `"exact"`
    /// or `"bounding"`.
    pub fn merged_with(&self, params: &Value) -> Self {
        let noise = NoiseSettings {
            octaves: param_u32(params, "octaves", self.noise.octaves),
            lacunarity: param_f64(params, "lacunarity", self.noise.lacunarity),
            gain: param_f64(params, "gain", self.noise.gain),
            frequency: param_f64(params, "frequency", self.noise.frequency),
            flatness: param_f64(params, "flatness", self.noise.flatness),
            contour_stretch: param_f64(params, "contour_stretch", self.noise.contour_stretch),
        };
        let perimeter = params
            .get("perimeter")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(self.render.perimeter);
        let render = RenderSettings {
            displacement_scale: param_f64(
                params,
                "displacement_scale",
                self.render.displacement_scale,
            ),
            border_offset: param_f64(params, "border_offset", self.render.border_offset),
            line_width: param_f64(params, "line_width", self.render.line_width),
            sample_spacing: param_f64(params, "sample_spacing", self.render.sample_spacing),
            max_frame_delta: param_f64(params, "max_frame_delta", self.render.max_frame_delta),
            max_device_pixel_ratio: param_f64(
                params,
                "max_device_pixel_ratio",
                self.render.max_device_pixel_ratio,
            ),
            perimeter,
        };
        Self { noise, render }
    }
}
