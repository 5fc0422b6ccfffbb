//! Pure per-frame computation.
//!
//! [`step_frame`] takes the owned clock plus the current dimensions and
//! style, and returns the next clock together with the displaced outline.
//! Nothing here touches a surface or a scheduler, so frames can be computed
//! and checked without any event loop.

use crate::clock::AnimationClock;
use crate::contour::RoundedRect;
use crate::settings::{BorderSettings, PerimeterEstimate, RenderSettings};
use crate::style::BorderStyle;
use crate::surface::SurfaceDimensions;
use glam::DVec2;
use noise::NoiseFn;

/// Noise seed of the horizontal displacement axis.
const X_SEED: f64 = 0.0;
/// Noise seed of the vertical displacement axis.
const Y_SEED: f64 = 1.0;

/// Summary of one executed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Number of contour intervals; the path holds `sample_count + 1` points.
    pub sample_count: usize,
    /// Clock time the noise was sampled at.
    pub elapsed: f64,
    /// Clamped wall-clock delta that advanced the clock, in seconds.
    pub delta: f64,
}

/// Displaced outline ready to stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub points: Vec<DVec2>,
    pub report: FrameReport,
}

/// Closest sample spacing honoured, in logical pixels.
pub const MIN_SAMPLE_SPACING: f64 = 0.5;

/// Upper bound on contour intervals per frame.
pub const MAX_SAMPLES: usize = 1 << 16;

/// Samples per frame for `rect`, roughly one per `sample_spacing` pixels.
///
/// Always in `1..=MAX_SAMPLES`, so a degenerate box still yields a closed
/// path and a huge box or tiny spacing cannot blow up the point buffer.
pub fn sample_count(rect: &RoundedRect, settings: &RenderSettings) -> usize {
    let perimeter = match settings.perimeter {
        PerimeterEstimate::Exact => rect.perimeter(),
        PerimeterEstimate::Bounding => rect.bounding_perimeter(),
    };
    let spacing = if settings.sample_spacing.is_finite() && settings.sample_spacing > 0.0 {
        settings.sample_spacing.max(MIN_SAMPLE_SPACING)
    } else {
        RenderSettings::default().sample_spacing
    };
    // `as` saturates: infinity maps to usize::MAX, NaN to 0.
    ((perimeter / spacing).floor() as usize).clamp(1, MAX_SAMPLES)
}

/// Samples `rect` at `sample_count + 1` evenly spaced fractions in [0, 1]
/// and displaces each point by two independent fractal-noise evaluations.
///
/// With `chaos = 0` every point lies exactly on the contour.
pub fn displaced_contour(
    rect: &RoundedRect,
    elapsed: f64,
    chaos: f64,
    settings: &BorderSettings,
) -> Vec<DVec2> {
    let count = sample_count(rect, &settings.render);
    let fractal = settings.noise.fractal(chaos);
    let x_noise = fractal.seeded(X_SEED);
    let y_noise = fractal.seeded(Y_SEED);
    let stretch = settings.noise.contour_stretch;
    let scale = settings.render.displacement_scale;

    (0..=count)
        .map(|i| {
            let progress = i as f64 / count as f64;
            let base = rect.point_at(progress);
            let position = progress * stretch;
            let offset = DVec2::new(
                x_noise.get([position, elapsed]),
                y_noise.get([position, elapsed]),
            );
            base + offset * scale
        })
        .collect()
}

/// Advances `clock` to `timestamp_ms` and computes the frame for the
/// current dimensions and style.
pub fn step_frame(
    clock: AnimationClock,
    timestamp_ms: f64,
    dims: &SurfaceDimensions,
    style: &BorderStyle,
    settings: &BorderSettings,
) -> (AnimationClock, Frame) {
    let (clock, delta) = clock.advance(
        timestamp_ms,
        style.speed,
        settings.render.max_frame_delta,
    );
    let rect = dims.content_rect(style.border_radius);
    let points = displaced_contour(&rect, clock.elapsed(), style.chaos, settings);
    let report = FrameReport {
        sample_count: points.len() - 1,
        elapsed: clock.elapsed(),
        delta,
    };
    (clock, Frame { points, report })
}
