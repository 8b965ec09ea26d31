//! Thick line segment.
//!
//! Used as the trend line behind a line alert (x = time, y = price) and for
//! hit-testing drawn lines. All queries are total: vertical, horizontal and
//! zero-length segments yield NaN or `None` instead of dividing by zero.

use crate::angle::normalize_degrees;
use crate::point::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    /// Full stroke width. Never negative.
    thickness: f64,
}

impl Segment {
    /// Negative or NaN thickness is clamped to 0.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>, thickness: f64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            thickness: thickness.max(0.0),
        }
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Distance from `(x, y)` to the closest point of the segment.
    ///
    /// The projection parameter is clamped to `[0, 1]`, so a point beyond an
    /// endpoint measures to that endpoint.
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;

        if len_sq == 0.0 {
            return self.start.distance_to(Point::new(x, y));
        }

        let t = (((x - self.start.x) * dx + (y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0);
        let closest = Point::new(self.start.x + t * dx, self.start.y + t * dy);

        closest.distance_to(Point::new(x, y))
    }

    /// Whether a distance falls within half the stroke width.
    pub fn intersects(&self, distance: f64) -> bool {
        distance <= self.thickness / 2.0
    }

    /// Hit test: is `(x, y)` on the stroked segment?
    pub fn intersects_point(&self, x: f64, y: f64) -> bool {
        self.intersects(self.distance_to_point(x, y))
    }

    /// Intersection point of two segments.
    ///
    /// Solves the 2x2 system of the two supporting lines; returns `None` when
    /// the determinant is zero (parallel or collinear). The candidate is
    /// accepted when it lies inside the axis-aligned bounding box of both
    /// segments, not by an exact parametric `[0, 1]` range test.
    pub fn intersect_segment(&self, other: &Segment) -> Option<Point> {
        let (a1, b1, c1) = self.line_coefficients();
        let (a2, b2, c2) = other.line_coefficients();

        let det = a1 * b2 - a2 * b1;
        if det == 0.0 {
            return None;
        }

        let p = Point::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det);

        (self.bbox_contains(p) && other.bbox_contains(p)).then_some(p)
    }

    /// Direction from start to end in degrees, in `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        let dy = self.end.y - self.start.y;
        let dx = self.end.x - self.start.x;
        normalize_degrees(dy.atan2(dx).to_degrees())
    }

    /// `y` on the supporting line at `x`. NaN for a vertical segment.
    ///
    /// Not clamped to the segment: values outside `[start.x, end.x]`
    /// extrapolate along the line.
    pub fn y_at(&self, x: f64) -> f64 {
        let dx = self.end.x - self.start.x;
        if dx == 0.0 {
            return f64::NAN;
        }
        self.start.y + (x - self.start.x) * (self.end.y - self.start.y) / dx
    }

    /// `x` on the supporting line at `y`. NaN for a horizontal segment.
    pub fn x_at(&self, y: f64) -> f64 {
        let dy = self.end.y - self.start.y;
        if dy == 0.0 {
            return f64::NAN;
        }
        self.start.x + (y - self.start.y) * (self.end.x - self.start.x) / dy
    }

    /// `a*x + b*y = c` form of the supporting line.
    fn line_coefficients(&self) -> (f64, f64, f64) {
        let a = self.end.y - self.start.y;
        let b = self.start.x - self.end.x;
        let c = a * self.start.x + b * self.start.y;
        (a, b, c)
    }

    fn bbox_contains(&self, p: Point) -> bool {
        let (min_x, max_x) = min_max(self.start.x, self.end.x);
        let (min_y, max_y) = min_max(self.start.y, self.end.y);
        (min_x..=max_x).contains(&p.x) && (min_y..=max_y).contains(&p.y)
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn distance_never_exceeds_nearest_endpoint(
            x1 in -1_000.0..1_000.0f64, y1 in -1_000.0..1_000.0f64,
            x2 in -1_000.0..1_000.0f64, y2 in -1_000.0..1_000.0f64,
            px in -2_000.0..2_000.0f64, py in -2_000.0..2_000.0f64,
        ) {
            let s = Segment::new((x1, y1), (x2, y2), 0.0);
            let p = Point::new(px, py);
            let d = s.distance_to_point(px, py);
            let nearest_end = s.start.distance_to(p).min(s.end.distance_to(p));

            prop_assert!(d >= 0.0);
            prop_assert!(d <= nearest_end + 1e-9);
        }

        #[test]
        fn angle_always_in_range(
            x1 in -1_000.0..1_000.0f64, y1 in -1_000.0..1_000.0f64,
            x2 in -1_000.0..1_000.0f64, y2 in -1_000.0..1_000.0f64,
        ) {
            let a = Segment::new((x1, y1), (x2, y2), 0.0).angle_degrees();
            prop_assert!((0.0..360.0).contains(&a));
        }
    }
}
