//! In-memory RGBA8 drawing surface.
//!
//! Mirrors what a browser canvas does for the border: a backing store sized
//! in device pixels, a logical-to-device scale, and round-capped,
//! round-joined polyline strokes. Joins come for free from taking the
//! maximum coverage over all segments before compositing once.

use crate::pixel::{blend_over, distance_to_segment, stroke_coverage};
use electric_border_core::{DrawSurface, StrokeStyle, SurfaceDimensions};
use glam::DVec2;
use tracing::warn;

/// Largest backing store allocated, in device pixels (8192 x 8192).
pub const MAX_BACKING_PIXELS: usize = 1 << 26;

/// CPU raster target implementing [`DrawSurface`].
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    scale: f64,
    pixels: Vec<u8>,
    coverage: Vec<f64>,
}

impl RasterSurface {
    /// An unconfigured 0x0 surface.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// Backing width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Backing height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical-to-device scale (the device pixel ratio).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Row-major RGBA8 pixel data, straight alpha.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at device pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    fn stamp_segment(&mut self, a: DVec2, b: DVec2, half_width: f64) {
        let reach = half_width + 1.0;
        let min = a.min(b) - DVec2::splat(reach);
        let max = a.max(b) + DVec2::splat(reach);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let c = stroke_coverage(distance_to_segment(center, a, b), half_width);
                if c > 0.0 {
                    let idx = y as usize * self.width as usize + x as usize;
                    if c > self.coverage[idx] {
                        self.coverage[idx] = c;
                    }
                }
            }
        }
    }
}

impl DrawSurface for RasterSurface {
    fn configure(&mut self, dims: &SurfaceDimensions) {
        let (width, height) = dims.backing_size();
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= MAX_BACKING_PIXELS);
        let bytes = len.and_then(|n| n.checked_mul(4));
        match (len, bytes) {
            (Some(len), Some(bytes)) => {
                self.width = width;
                self.height = height;
                self.pixels = vec![0; bytes];
                self.coverage = vec![0.0; len];
            }
            _ => {
                warn!(width, height, "backing store too large; raster surface disabled");
                self.width = 0;
                self.height = 0;
                self.pixels.clear();
                self.coverage.clear();
            }
        }
        self.scale = dims.device_pixel_ratio;
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn stroke_closed_path(&mut self, points: &[DVec2], stroke: &StrokeStyle) {
        let half_width = stroke.line_width * self.scale / 2.0;
        if points.len() < 2 || self.pixels.is_empty() || !half_width.is_finite() || half_width <= 0.0 {
            return;
        }

        self.coverage.fill(0.0);
        let device: Vec<DVec2> = points.iter().map(|p| *p * self.scale).collect();
        for pair in device.windows(2) {
            self.stamp_segment(pair[0], pair[1], half_width);
        }
        if let (Some(&first), Some(&last)) = (device.first(), device.last()) {
            self.stamp_segment(last, first, half_width);
        }

        let color = stroke.color;
        for (px, &c) in self.pixels.chunks_exact_mut(4).zip(self.coverage.iter()) {
            if c > 0.0 {
                blend_over(px, color, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electric_border_core::{
        displaced_contour, BorderController, BorderSettings, BorderStyle, ManualScheduler,
        RenderSettings, Srgba,
    };

    fn dims(w: f64, h: f64, dpr: f64) -> SurfaceDimensions {
        SurfaceDimensions::from_host(w, h, dpr, &RenderSettings::default()).unwrap()
    }

    fn stroke() -> StrokeStyle {
        StrokeStyle {
            color: Srgba::rgb8(0x3b, 0x82, 0xf6),
            line_width: 1.2,
        }
    }

    #[test]
    fn new_surface_is_empty() {
        let s = RasterSurface::new();
        assert_eq!((s.width(), s.height()), (0, 0));
        assert!(s.pixels().is_empty());
        assert!((s.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn configure_allocates_backing_store() {
        let mut s = RasterSurface::new();
        s.configure(&dims(300.0, 150.0, 2.0));
        assert_eq!((s.width(), s.height()), (840, 540));
        assert_eq!(s.pixels().len(), 840 * 540 * 4);
        assert!((s.scale() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_backing_store_is_refused() {
        let mut s = RasterSurface::new();
        s.configure(&dims(100_000.0, 100_000.0, 1.0));
        assert_eq!((s.width(), s.height()), (0, 0));
        assert!(s.pixels().is_empty());
        s.stroke_closed_path(&[DVec2::ZERO, DVec2::new(10.0, 10.0)], &stroke());
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn stroke_on_unconfigured_surface_is_ignored() {
        let mut s = RasterSurface::new();
        s.stroke_closed_path(&[DVec2::ZERO, DVec2::new(10.0, 10.0)], &stroke());
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn smooth_outline_paints_contour_only() {
        let d = dims(300.0, 150.0, 1.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        let rect = d.content_rect(24.0);
        let points = displaced_contour(&rect, 0.0, 0.0, &BorderSettings::default());
        s.stroke_closed_path(&points, &stroke());

        // Middle of the top edge is painted, the box center and the margin are not.
        let top = s.pixel(210, 60).unwrap();
        assert!(top[3] > 0, "top edge not painted: {top:?}");
        assert_eq!(s.pixel(210, 135).unwrap()[3], 0);
        assert_eq!(s.pixel(5, 5).unwrap()[3], 0);
        // Rounded corner: the sharp box corner stays empty.
        assert_eq!(s.pixel(60, 60).unwrap()[3], 0);
    }

    #[test]
    fn scale_maps_logical_to_device_pixels() {
        let d = dims(300.0, 150.0, 2.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        let points = displaced_contour(&d.content_rect(24.0), 0.0, 0.0, &BorderSettings::default());
        s.stroke_closed_path(&points, &stroke());
        assert!(s.pixel(420, 120).unwrap()[3] > 0);
        assert!(s.pixel(419, 119).unwrap()[3] > 0 || s.pixel(420, 119).unwrap()[3] > 0);
        assert_eq!(s.pixel(420, 270).unwrap()[3], 0);
    }

    #[test]
    fn closing_segment_is_drawn() {
        let d = dims(100.0, 100.0, 1.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        let points = [
            DVec2::new(10.0, 10.0),
            DVec2::new(100.0, 10.0),
            DVec2::new(100.0, 100.0),
        ];
        s.stroke_closed_path(&points, &stroke());
        // Midpoint of the diagonal from the last point back to the first.
        assert!(s.pixel(55, 55).unwrap()[3] > 0);
    }

    #[test]
    fn overlapping_segments_do_not_double_blend() {
        let d = dims(100.0, 100.0, 1.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        let translucent = StrokeStyle {
            color: Srgba::from_hex("#ffffff80").unwrap(),
            line_width: 4.0,
        };
        let points = [
            DVec2::new(10.0, 50.5),
            DVec2::new(90.0, 50.5),
            DVec2::new(10.0, 50.5),
        ];
        s.stroke_closed_path(&points, &translucent);
        assert_eq!(s.pixel(50, 50).unwrap()[3], 128);
    }

    #[test]
    fn clear_resets_pixels() {
        let d = dims(100.0, 100.0, 1.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        s.stroke_closed_path(&[DVec2::new(0.0, 0.0), DVec2::new(50.0, 50.0)], &stroke());
        assert!(s.painted_pixels() > 0);
        s.clear();
        assert_eq!(s.painted_pixels(), 0);
    }

    #[test]
    fn controller_draws_into_raster_surface() {
        let mut c = BorderController::new(
            BorderStyle::default(),
            BorderSettings::default(),
            ManualScheduler::new(),
            Some(RasterSurface::new()),
        );
        c.on_resized(300.0, 150.0);
        c.on_visibility_changed(true);
        for i in 1..=3 {
            assert!(c.pump(i as f64 * 16.0).is_some());
        }
        let s = c.surface().unwrap();
        assert_eq!((s.width(), s.height()), (420, 270));
        assert!(s.painted_pixels() > 500);
    }

    #[test]
    fn points_outside_surface_are_clipped() {
        let d = dims(10.0, 10.0, 1.0);
        let mut s = RasterSurface::new();
        s.configure(&d);
        s.stroke_closed_path(
            &[DVec2::new(-500.0, -500.0), DVec2::new(1000.0, 1000.0)],
            &stroke(),
        );
        assert!(s.painted_pixels() > 0);
    }
}
