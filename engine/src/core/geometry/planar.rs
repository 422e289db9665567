//! Planar geometry primitives
//!
//! Pure functions over a local 2D frame where `x` is the depth-like axis and
//! `y` the lateral axis unless noted otherwise. They carry no knowledge of
//! frusta; the view pyramid composes them into its side tests.

use glam::DVec2;

/// Check that a point lies inside a wedge opening along +x
///
/// The wedge has its apex at the origin, a full opening angle of
/// `fov_degrees` and is cut off at `max_depth`. Borders are inclusive.
pub fn point_in_wedge(point: DVec2, fov_degrees: f64, max_depth: f64) -> bool {
    if point.x < 0.0 || point.x > max_depth {
        return false;
    }

    let border = (fov_degrees / 2.0).to_radians().tan() * point.x;
    point.y.abs() <= border
}

/// Check that a point lies inside an origin-centered axis-aligned rectangle
pub fn point_in_rectangle(point: DVec2, width: f64, height: f64) -> bool {
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    point.x >= -half_width
        && point.x <= half_width
        && point.y >= -half_height
        && point.y <= half_height
}

/// Intersect a circle with the line `y = slope * x` through the origin
///
/// Returns both roots of the quadratic; a tangent line yields the same
/// point twice.
pub fn circle_line_intersections(center: DVec2, radius: f64, slope: f64) -> Option<[DVec2; 2]> {
    let a = 1.0 + slope * slope;
    let b = -2.0 * center.x - 2.0 * slope * center.y;
    let c = center.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let x1 = (-b + root) / (2.0 * a);
    let x2 = (-b - root) / (2.0 * a);

    Some([DVec2::new(x1, slope * x1), DVec2::new(x2, slope * x2)])
}

/// Intersect a circle with the vertical line `x = line_x`
///
/// Points are ordered by ascending `y`.
pub fn circle_vertical_line_intersections(
    center: DVec2,
    radius: f64,
    line_x: f64,
) -> Option<[DVec2; 2]> {
    let offset = center.x - line_x;
    if offset.abs() > radius {
        return None;
    }

    let half_chord = (radius * radius - offset * offset).sqrt();

    Some([
        DVec2::new(line_x, center.y - half_chord),
        DVec2::new(line_x, center.y + half_chord),
    ])
}

/// Intersect a circle with the horizontal line `y = line_y`
///
/// Solved by swapping axes into the vertical case. Points are ordered by
/// ascending `x`.
pub fn circle_horizontal_line_intersections(
    center: DVec2,
    radius: f64,
    line_y: f64,
) -> Option<[DVec2; 2]> {
    circle_vertical_line_intersections(DVec2::new(center.y, center.x), radius, line_y)
        .map(|points| points.map(|point| DVec2::new(point.y, point.x)))
}

/// The four cardinal extrema of a circle: +x, -x, +y, -y
pub fn circle_border_points(center: DVec2, radius: f64) -> [DVec2; 4] {
    [
        DVec2::new(center.x + radius, center.y),
        DVec2::new(center.x - radius, center.y),
        DVec2::new(center.x, center.y + radius),
        DVec2::new(center.x, center.y - radius),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_point_in_wedge() {
        // 90° wedge: |y| <= x
        assert!(point_in_wedge(DVec2::new(5.0, 4.9), 90.0, 10.0));
        assert!(point_in_wedge(DVec2::new(5.0, -4.9), 90.0, 10.0));
        assert!(!point_in_wedge(DVec2::new(5.0, 5.1), 90.0, 10.0));
        assert!(point_in_wedge(DVec2::ZERO, 90.0, 10.0));
    }

    #[test]
    fn test_point_in_wedge_depth_limits() {
        assert!(!point_in_wedge(DVec2::new(-0.1, 0.0), 90.0, 10.0));
        assert!(point_in_wedge(DVec2::new(10.0, 0.0), 90.0, 10.0));
        assert!(!point_in_wedge(DVec2::new(10.1, 0.0), 90.0, 10.0));
    }

    #[test]
    fn test_point_in_rectangle() {
        assert!(point_in_rectangle(DVec2::new(1.0, -0.5), 2.0, 1.0));
        assert!(point_in_rectangle(DVec2::ZERO, 2.0, 1.0));
        assert!(!point_in_rectangle(DVec2::new(1.01, 0.0), 2.0, 1.0));
        assert!(!point_in_rectangle(DVec2::new(0.0, -0.51), 2.0, 1.0));
    }

    #[test]
    fn test_circle_line_through_center() {
        let points = circle_line_intersections(DVec2::new(5.0, 0.0), 1.0, 0.0).unwrap();
        assert!(approx(points[0], DVec2::new(6.0, 0.0)));
        assert!(approx(points[1], DVec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_circle_line_diagonal() {
        // Circle at origin, radius sqrt(2): y = x crosses at (±1, ±1)
        let points = circle_line_intersections(DVec2::ZERO, 2f64.sqrt(), 1.0).unwrap();
        assert!(approx(points[0], DVec2::new(1.0, 1.0)));
        assert!(approx(points[1], DVec2::new(-1.0, -1.0)));
    }

    #[test]
    fn test_circle_line_miss() {
        let points = circle_line_intersections(DVec2::new(0.0, 5.0), 1.0, 0.0);
        assert!(points.is_none());
    }

    #[test]
    fn test_circle_vertical_line() {
        let center = DVec2::new(0.0, 2.0);
        let points = circle_vertical_line_intersections(center, 5.0, 3.0).unwrap();
        assert!(approx(points[0], DVec2::new(3.0, -2.0)));
        assert!(approx(points[1], DVec2::new(3.0, 6.0)));

        let missed = circle_vertical_line_intersections(DVec2::ZERO, 1.0, 1.5);
        assert!(missed.is_none());
    }

    #[test]
    fn test_circle_vertical_line_tangent() {
        let points = circle_vertical_line_intersections(DVec2::ZERO, 1.0, 1.0).unwrap();
        assert!(approx(points[0], DVec2::new(1.0, 0.0)));
        assert!(approx(points[1], DVec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_circle_horizontal_line_swaps_axes() {
        let center = DVec2::new(2.0, 0.0);
        let points = circle_horizontal_line_intersections(center, 5.0, 3.0).unwrap();
        assert!(approx(points[0], DVec2::new(-2.0, 3.0)));
        assert!(approx(points[1], DVec2::new(6.0, 3.0)));

        let missed = circle_horizontal_line_intersections(DVec2::ZERO, 1.0, -2.0);
        assert!(missed.is_none());
    }

    #[test]
    fn test_circle_border_points() {
        let points = circle_border_points(DVec2::new(1.0, 2.0), 3.0);
        assert_eq!(points[0], DVec2::new(4.0, 2.0));
        assert_eq!(points[1], DVec2::new(-2.0, 2.0));
        assert_eq!(points[2], DVec2::new(1.0, 5.0));
        assert_eq!(points[3], DVec2::new(1.0, -1.0));
    }
}
