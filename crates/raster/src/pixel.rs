//! Pure pixel math shared by the raster surface: stroke coverage and
//! straight-alpha source-over compositing into RGBA8.

use electric_border_core::Srgba;
use glam::DVec2;

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t).distance(p)
}

/// Anti-aliased coverage of a pixel whose center is `distance` away from the
/// stroke's center line, for a stroke of half-width `half_width`.
///
/// A one-pixel linear ramp centered on the stroke edge.
pub fn stroke_coverage(distance: f64, half_width: f64) -> f64 {
    (half_width + 0.5 - distance).clamp(0.0, 1.0)
}

/// Composites `color` at `coverage` over the RGBA8 pixel `dst`.
pub fn blend_over(dst: &mut [u8], color: Srgba, coverage: f64) {
    let src_a = color.a.clamp(0.0, 1.0) * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let channel = |src: f64, dst: u8| {
        let dst = dst as f64 / 255.0;
        let out = (src.clamp(0.0, 1.0) * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round() as u8
    };
    dst[0] = channel(color.r, dst[0]);
    dst[1] = channel(color.g, dst[1]);
    dst[2] = channel(color.b, dst[2]);
    dst[3] = (out_a * 255.0).round() as u8;
}
