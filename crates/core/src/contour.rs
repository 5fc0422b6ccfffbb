//! Rounded-rectangle contour parameterized by arc length.
//!
//! The perimeter is walked clockwise (screen coordinates, y down) starting at
//! the left end of the top edge, just after the top-left corner:
//! top edge, top-right arc, right edge, bottom-right arc, bottom edge,
//! bottom-left arc, left edge, top-left arc. Noise is sampled in the same
//! order, so the order and the arc start angles must not change.

use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};

/// A point on the undisplaced contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySample {
    /// Normalized arc-length position in [0, 1].
    pub fraction: f64,
    pub point: DVec2,
}

/// One piece of the perimeter walk.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Line { from: DVec2, to: DVec2 },
    Arc { center: DVec2, start_angle: f64 },
}

/// Axis-aligned rectangle with uniformly rounded corners.
///
/// Construction never fails: negative or non-finite sizes collapse to zero
/// and the radius is clamped to `[0, min(width, height) / 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    radius: f64,
}

/// Maps NaN and negatives to zero.
fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

impl RoundedRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64, radius: f64) -> Self {
        let width = non_negative(width);
        let height = non_negative(height);
        let max_radius = width.min(height) / 2.0;
        let radius = non_negative(radius).min(max_radius);
        Self {
            left: if left.is_finite() { left } else { 0.0 },
            top: if top.is_finite() { top } else { 0.0 },
            width,
            height,
            radius,
        }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Corner radius after clamping.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest radius this rectangle accepts.
    pub fn max_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Length of each horizontal straight edge.
    pub fn straight_width(&self) -> f64 {
        self.width - 2.0 * self.radius
    }

    /// Length of each vertical straight edge.
    pub fn straight_height(&self) -> f64 {
        self.height - 2.0 * self.radius
    }

    /// Length of one quarter-circle corner.
    pub fn corner_arc(&self) -> f64 {
        PI * self.radius / 2.0
    }

    /// True arc-length perimeter.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.straight_width() + self.straight_height()) + 4.0 * self.corner_arc()
    }

    /// `2 (w + h) + 2 pi r`: the box perimeter plus a full circle, without
    /// subtracting the corners the arcs replace.
    pub fn bounding_perimeter(&self) -> f64 {
        2.0 * (self.width + self.height) + 2.0 * PI * self.radius
    }

    fn segments(&self) -> [(Segment, f64); 8] {
        let (l, t, w, h, r) = (self.left, self.top, self.width, self.height, self.radius);
        let sw = self.straight_width();
        let sh = self.straight_height();
        let arc = self.corner_arc();
        [
            (
                Segment::Line {
                    from: DVec2::new(l + r, t),
                    to: DVec2::new(l + w - r, t),
                },
                sw,
            ),
            (
                Segment::Arc {
                    center: DVec2::new(l + w - r, t + r),
                    start_angle: -FRAC_PI_2,
                },
                arc,
            ),
            (
                Segment::Line {
                    from: DVec2::new(l + w, t + r),
                    to: DVec2::new(l + w, t + h - r),
                },
                sh,
            ),
            (
                Segment::Arc {
                    center: DVec2::new(l + w - r, t + h - r),
                    start_angle: 0.0,
                },
                arc,
            ),
            (
                Segment::Line {
                    from: DVec2::new(l + w - r, t + h),
                    to: DVec2::new(l + r, t + h),
                },
                sw,
            ),
            (
                Segment::Arc {
                    center: DVec2::new(l + r, t + h - r),
                    start_angle: FRAC_PI_2,
                },
                arc,
            ),
            (
                Segment::Line {
                    from: DVec2::new(l, t + h - r),
                    to: DVec2::new(l, t + r),
                },
                sh,
            ),
            (
                Segment::Arc {
                    center: DVec2::new(l + r, t + r),
                    start_angle: PI,
                },
                arc,
            ),
        ]
    }

    /// Point at normalized arc length `t`.
    ///
    /// `t` is clamped to [0, 1]; `t = 1` lands back on the start point.
    /// Zero-length segments are skipped, so degenerate rectangles never
    /// produce NaN.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let distance = t * self.perimeter();
        let segments = self.segments();

        let mut accumulated = 0.0;
        for (i, (segment, length)) in segments.iter().enumerate() {
            let last = i == segments.len() - 1;
            if distance <= accumulated + length || last {
                let progress = if *length > 0.0 {
                    ((distance - accumulated) / length).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return self.segment_point(*segment, progress);
            }
            accumulated += length;
        }

        DVec2::new(self.left + self.radius, self.top)
    }

    fn segment_point(&self, segment: Segment, progress: f64) -> DVec2 {
        match segment {
            Segment::Line { from, to } => from.lerp(to, progress),
            Segment::Arc {
                center,
                start_angle,
            } => {
                let angle = start_angle + progress * FRAC_PI_2;
                center + self.radius * DVec2::new(angle.cos(), angle.sin())
            }
        }
    }

    /// Samples the contour at `t`, keeping the fraction alongside the point.
    pub fn sample(&self, t: f64) -> GeometrySample {
        GeometrySample {
            fraction: t,
            point: self.point_at(t),
        }
    }

    /// Unsigned distance from `p` to the contour.
    pub fn distance_to_boundary(&self, p: DVec2) -> f64 {
        let half = DVec2::new(self.width, self.height) / 2.0;
        let center = DVec2::new(self.left, self.top) + half;
        let q = (p - center).abs() - half + DVec2::splat(self.radius);
        let outside = q.max(DVec2::ZERO).length();
        let inside = q.x.max(q.y).min(0.0);
        (outside + inside - self.radius).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn card() -> RoundedRect {
        RoundedRect::new(60.0, 60.0, 300.0, 150.0, 24.0)
    }

    fn approx(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    // ---- construction ----

    #[test]
    fn radius_within_limit_is_kept() {
        let r = card();
        assert!((r.max_radius() - 75.0).abs() < EPSILON);
        assert!((r.radius() - 24.0).abs() < EPSILON);
    }

    #[test]
    fn oversized_radius_is_clamped_to_half_short_side() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 40.0, 500.0);
        assert!((r.radius() - 20.0).abs() < EPSILON);
        assert!(r.straight_height().abs() < EPSILON);
    }

    #[test]
    fn negative_and_nan_inputs_collapse_to_zero() {
        let r = RoundedRect::new(f64::NAN, 0.0, -10.0, f64::NAN, -3.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert_eq!(r.radius(), 0.0);
        assert_eq!(r.left(), 0.0);
    }

    // ---- perimeter ----

    #[test]
    fn perimeter_matches_worked_example() {
        let r = card();
        assert!((r.corner_arc() - 37.699).abs() < 1e-3);
        let expected = 2.0 * (300.0 - 48.0) + 2.0 * (150.0 - 48.0) + 4.0 * PI * 24.0 / 2.0;
        assert!((r.perimeter() - expected).abs() < EPSILON);
        assert!((r.perimeter() - 858.8).abs() < 0.1);
    }

    #[test]
    fn bounding_perimeter_ignores_corner_truncation() {
        let r = card();
        assert!((r.bounding_perimeter() - (900.0 + 48.0 * PI)).abs() < EPSILON);
    }

    #[test]
    fn square_corners_give_box_perimeter() {
        let r = RoundedRect::new(0.0, 0.0, 10.0, 20.0, 0.0);
        assert!((r.perimeter() - 60.0).abs() < EPSILON);
    }

    #[test]
    fn circle_perimeter_when_fully_rounded_square() {
        let r = RoundedRect::new(0.0, 0.0, 20.0, 20.0, 10.0);
        assert!((r.perimeter() - 2.0 * PI * 10.0).abs() < EPSILON);
    }

    // ---- traversal ----

    #[test]
    fn start_point_is_top_edge_after_top_left_corner() {
        let r = card();
        assert!(approx(r.point_at(0.0), DVec2::new(84.0, 60.0)));
    }

    #[test]
    fn end_point_closes_the_loop() {
        let r = card();
        assert!(approx(r.point_at(1.0), r.point_at(0.0)));
        assert!(r.point_at(1.0 - 1e-9).distance(r.point_at(0.0)) < 1e-5);
    }

    #[test]
    fn traversal_is_clockwise() {
        let r = card();
        // Moving right along the top edge, then down the right edge.
        assert!(r.point_at(0.01).x > r.point_at(0.0).x);
        let right_edge_start = (r.straight_width() + r.corner_arc()) / r.perimeter();
        let p = r.point_at(right_edge_start + 0.01);
        assert!((p.x - 360.0).abs() < EPSILON);
        assert!(p.y > 84.0);
    }

    #[test]
    fn segment_boundaries_hit_expected_corners() {
        let r = card();
        let p = r.perimeter();
        let sw = r.straight_width();
        let arc = r.corner_arc();
        let sh = r.straight_height();
        assert!(approx(r.point_at(sw / p), DVec2::new(336.0, 60.0)));
        assert!(approx(r.point_at((sw + arc) / p), DVec2::new(360.0, 84.0)));
        assert!(approx(
            r.point_at((sw + arc + sh) / p),
            DVec2::new(360.0, 186.0)
        ));
        assert!(approx(
            r.point_at((sw + 2.0 * arc + sh) / p),
            DVec2::new(336.0, 210.0)
        ));
        assert!(approx(
            r.point_at((2.0 * sw + 3.0 * arc + sh) / p),
            DVec2::new(60.0, 186.0)
        ));
    }

    #[test]
    fn arc_midpoint_sits_on_the_diagonal() {
        let r = card();
        let t = (r.straight_width() + r.corner_arc() / 2.0) / r.perimeter();
        let p = r.point_at(t);
        let center = DVec2::new(336.0, 84.0);
        let offset = p - center;
        assert!((offset.length() - 24.0).abs() < 1e-9);
        assert!((offset.x - (-offset.y)).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        let r = card();
        assert!(approx(r.point_at(-0.5), r.point_at(0.0)));
        assert!(approx(r.point_at(f64::NAN), r.point_at(0.0)));
        assert!(approx(r.point_at(3.0), r.point_at(1.0)));
    }

    #[test]
    fn zero_size_rect_yields_finite_points() {
        let r = RoundedRect::new(5.0, 7.0, 0.0, 0.0, 24.0);
        for i in 0..=10 {
            let p = r.point_at(i as f64 / 10.0);
            assert!(p.is_finite());
            assert!(approx(p, DVec2::new(5.0, 7.0)));
        }
    }

    #[test]
    fn pill_shape_with_zero_straight_height_stays_finite() {
        let r = RoundedRect::new(0.0, 0.0, 100.0, 40.0, 20.0);
        for i in 0..=200 {
            let p = r.point_at(i as f64 / 200.0);
            assert!(p.is_finite());
            assert!(r.distance_to_boundary(p) < 1e-9);
        }
    }

    #[test]
    fn sample_keeps_fraction() {
        let s = card().sample(0.25);
        assert_eq!(s.fraction, 0.25);
        assert!(approx(s.point, card().point_at(0.25)));
    }

    #[test]
    fn distance_to_boundary_is_positive_off_contour() {
        let r = card();
        assert!((r.distance_to_boundary(DVec2::new(210.0, 50.0)) - 10.0).abs() < 1e-9);
        assert!((r.distance_to_boundary(DVec2::new(210.0, 135.0)) - 75.0).abs() < 1e-9);
    }

    // =======================================================================
    // Property-based tests
    // =======================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_point_lies_on_the_boundary(
                left in -500.0_f64..500.0,
                top in -500.0_f64..500.0,
                width in 1.0_f64..2000.0,
                height in 1.0_f64..2000.0,
                radius in 0.0_f64..400.0,
                t in 0.0_f64..1.0,
            ) {
                let r = RoundedRect::new(left, top, width, height, radius);
                let p = r.point_at(t);
                let d = r.distance_to_boundary(p);
                prop_assert!(d < 1e-6, "point {:?} at t={} is {} off the contour", p, t, d);
            }

            #[test]
            fn arc_length_is_monotone_along_top_edge(
                width in 100.0_f64..1000.0,
                a in 0.0_f64..1.0,
                b in 0.0_f64..1.0,
            ) {
                let r = RoundedRect::new(0.0, 0.0, width, 80.0, 10.0);
                let edge = r.straight_width() / r.perimeter();
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                prop_assume!(hi - lo > 1e-6);
                prop_assert!(r.point_at(lo * edge).x < r.point_at(hi * edge).x);
            }
        }
    }
}
