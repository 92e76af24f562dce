//! Best-effort intersection helpers for circles, segments and polygons.
//!
//! These operate on flat geometry only; none of them are aware of the
//! canvas transform. Results are approximate in the usual floating-point
//! sense, and tangency cases are resolved with a small epsilon.

use glam::Vec2;

use crate::{Circle, Polygon};

const TANGENT_EPSILON: f32 = 1e-5;

/// Intersects the segments `a1..a2` and `b1..b2`.
///
/// Returns `None` for parallel (including collinear overlapping)
/// segments.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = da.perp_dot(db);
    if denom.abs() <= f32::EPSILON {
        return None;
    }

    let t = (b1 - a1).perp_dot(db) / denom;
    let u = (b1 - a1).perp_dot(da) / denom;
    ((0. ..=1.).contains(&t) && (0. ..=1.).contains(&u)).then(|| a1 + da * t)
}

/// The points where two circle boundaries cross.
///
/// Zero points for disjoint or nested circles, one for (near-)tangent
/// circles, two otherwise. Coincident circles return no points.
pub fn circle_circle_intersections(a: &Circle, b: &Circle) -> Vec<Vec2> {
    let between = b.center() - a.center();
    let distance = between.length();
    if distance <= f32::EPSILON {
        return Vec::new();
    }
    if distance > a.radius() + b.radius() || distance < (a.radius() - b.radius()).abs() {
        return Vec::new();
    }

    // Distance from a's center to the chord connecting the
    // intersection points, along the center line.
    let along = (distance * distance + a.radius() * a.radius() - b.radius() * b.radius())
        / (2. * distance);
    let chord_half_squared = a.radius() * a.radius() - along * along;

    let direction = between / distance;
    let chord_center = a.center() + direction * along;
    if chord_half_squared <= TANGENT_EPSILON {
        return vec![chord_center];
    }

    let offset = direction.perp() * chord_half_squared.sqrt();
    vec![chord_center + offset, chord_center - offset]
}

/// The area of the lens shared by two overlapping circles.
///
/// Returns `None` unless the circle boundaries actually cross: disjoint
/// circles share nothing, and a circle nested inside another has no
/// lens (its whole area is shared instead).
pub fn circle_intersection_area(a: &Circle, b: &Circle) -> Option<f32> {
    let distance = a.center().distance(b.center());
    let (r1, r2) = (a.radius(), b.radius());
    if distance >= r1 + r2 || distance <= (r1 - r2).abs() {
        return None;
    }

    let d2 = distance * distance;
    let alpha = ((d2 + r1 * r1 - r2 * r2) / (2. * distance * r1)).clamp(-1., 1.);
    let beta = ((d2 + r2 * r2 - r1 * r1) / (2. * distance * r2)).clamp(-1., 1.);
    let triangle = 0.5
        * ((-distance + r1 + r2)
            * (distance + r1 - r2)
            * (distance - r1 + r2)
            * (distance + r1 + r2))
            .max(0.)
            .sqrt();

    Some(r1 * r1 * alpha.acos() + r2 * r2 * beta.acos() - triangle)
}

/// The points where a segment crosses a circle boundary.
pub fn segment_circle_intersections(start: Vec2, end: Vec2, circle: &Circle) -> Vec<Vec2> {
    let direction = end - start;
    let to_start = start - circle.center();

    // Solve |to_start + t * direction|^2 = r^2 for t in [0, 1].
    let a = direction.length_squared();
    if a <= f32::EPSILON {
        return Vec::new();
    }
    let b = 2. * to_start.dot(direction);
    let c = to_start.length_squared() - circle.radius() * circle.radius();
    let discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        return Vec::new();
    }

    let root = discriminant.sqrt();
    let mut points = Vec::new();
    for t in [(-b - root) / (2. * a), (-b + root) / (2. * a)] {
        if (0. ..=1.).contains(&t) {
            points.push(start + direction * t);
        }
    }
    if discriminant <= TANGENT_EPSILON && points.len() == 2 {
        points.truncate(1);
    }
    points
}

/// All points where a polygon's edges (including the closing edge)
/// cross a circle's boundary, in edge order.
pub fn polygon_circle_intersections(polygon: &Polygon, circle: &Circle) -> Vec<Vec2> {
    let points = polygon.points();
    let n = points.len();
    let mut intersections = Vec::new();
    for i in 0..n {
        let start = points[i];
        let end = points[(i + 1) % n];
        intersections.extend(segment_circle_intersections(start, end, circle));
    }
    intersections
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::vec2;

    use super::*;

    #[test]
    fn segments_crossing() {
        let point =
            segment_intersection(vec2(0., 0.), vec2(10., 10.), vec2(0., 10.), vec2(10., 0.))
                .unwrap();
        assert!(point.distance(vec2(5., 5.)) < 1e-5);
    }

    #[test]
    fn segments_apart() {
        assert!(
            segment_intersection(vec2(0., 0.), vec2(1., 0.), vec2(0., 1.), vec2(1., 1.)).is_none()
        );
        // Intersecting lines, but not within the segments.
        assert!(
            segment_intersection(vec2(0., 0.), vec2(1., 0.), vec2(5., -1.), vec2(5., 1.))
                .is_none()
        );
    }

    #[test]
    fn circles_crossing_twice() {
        let a = Circle::new(vec2(0., 0.), 5.);
        let b = Circle::new(vec2(6., 0.), 5.);
        let points = circle_circle_intersections(&a, &b);
        assert_eq!(points.len(), 2);
        for point in points {
            assert!((point.x - 3.).abs() < 1e-4);
            assert!((point.y.abs() - 4.).abs() < 1e-4);
        }
    }

    #[test]
    fn circles_tangent() {
        let a = Circle::new(vec2(0., 0.), 2.);
        let b = Circle::new(vec2(4., 0.), 2.);
        let points = circle_circle_intersections(&a, &b);
        assert_eq!(points.len(), 1);
        assert!(points[0].distance(vec2(2., 0.)) < 1e-4);
    }

    #[test]
    fn circles_disjoint_or_nested() {
        let big = Circle::new(vec2(0., 0.), 10.);
        let far = Circle::new(vec2(100., 0.), 1.);
        let inner = Circle::new(vec2(1., 0.), 2.);
        assert!(circle_circle_intersections(&big, &far).is_empty());
        assert!(circle_circle_intersections(&big, &inner).is_empty());
        assert!(circle_intersection_area(&big, &far).is_none());
        assert!(circle_intersection_area(&big, &inner).is_none());
    }

    #[test]
    fn lens_area_of_coincident_halves() {
        // Two unit circles with centers a distance 0 apart would fully
        // overlap; at distance 0 we report no lens. Check a known value
        // instead: equal circles at distance r have lens area
        // 2r^2 (pi/3 - sqrt(3)/4).
        let a = Circle::new(vec2(0., 0.), 1.);
        let b = Circle::new(vec2(1., 0.), 1.);
        let expected = 2. * (PI / 3. - 3f32.sqrt() / 4.);
        let area = circle_intersection_area(&a, &b).unwrap();
        assert!((area - expected).abs() < 1e-4, "area {area} != {expected}");
    }

    #[test]
    fn segment_through_circle() {
        let circle = Circle::new(vec2(0., 0.), 5.);
        let points = segment_circle_intersections(vec2(-10., 0.), vec2(10., 0.), &circle);
        assert_eq!(points.len(), 2);
        assert!(points[0].distance(vec2(-5., 0.)) < 1e-4);
        assert!(points[1].distance(vec2(5., 0.)) < 1e-4);
    }

    #[test]
    fn segment_ending_inside_circle() {
        let circle = Circle::new(vec2(0., 0.), 5.);
        let points = segment_circle_intersections(vec2(-10., 0.), vec2(0., 0.), &circle);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn polygon_circle() {
        let square = Polygon::new(vec![
            vec2(-10., -10.),
            vec2(10., -10.),
            vec2(10., 10.),
            vec2(-10., 10.),
        ]);
        // Circle pokes through all four sides.
        let circle = Circle::new(vec2(0., 0.), 11.);
        assert_eq!(polygon_circle_intersections(&square, &circle).len(), 8);

        let tiny = Circle::new(vec2(0., 0.), 1.);
        assert!(polygon_circle_intersections(&square, &tiny).is_empty());
    }
}
