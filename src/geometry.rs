//! Planar geometry primitives.
//!
//! Course units are plain `f64` values with the origin in the top-left corner of the board and
//! the y axis growing downward, the same orientation the course is authored in.

use glam::DVec2;

/// A point on the board, in course units.
///
/// Double precision keeps the course coordinates exact for the integer and half-integer values
/// the built-in course is authored with.
pub type Point = DVec2;

/// Linear interpolation from `start` to `end`.
///
/// `progress` is not clamped: values outside `[0, 1]` extrapolate along the same line, and
/// clamping is left to the caller.
#[must_use]
pub fn lerp(start: Point, end: Point, progress: f64) -> Point {
    start.lerp(end, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let start = Point::new(100., 50.);
        let end = Point::new(250., 50.);

        assert_eq!(lerp(start, end, 0.), start);
        assert_eq!(lerp(start, end, 1.), end);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp(Point::ZERO, Point::new(10., -20.), 0.5);

        assert_eq!(mid, Point::new(5., -10.));
    }

    #[test]
    fn test_lerp_does_not_clamp() {
        let start = Point::ZERO;
        let end = Point::new(4., 2.);

        assert_eq!(lerp(start, end, 2.), Point::new(8., 4.));
        assert_eq!(lerp(start, end, -1.), Point::new(-4., -2.));
    }

    #[test]
    fn test_course_points_from_tuples() {
        let anchor = Point::from((250., 200.));

        assert_eq!(anchor, Point::new(250., 200.));
        assert!((anchor.distance(Point::new(253., 204.)) - 5.).abs() < f64::EPSILON);
        assert!(!Point::new(f64::NAN, 2.).is_finite());
    }
}
