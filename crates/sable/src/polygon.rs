use glam::{vec2, Vec2};

use crate::{Path, Rectangle};

/// Joins closer to parallel than this fall back to the
/// plain edge normal during offsetting.
const PARALLEL_EPSILON: f32 = 1e-4;

/// An ordered list of 2D points, treated as implicitly closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// The signed area by the shoelace formula. Positive for
    /// counterclockwise winding in a y-up coordinate system; the
    /// sign flips under the y-down convention used by [`Canvas`](crate::Canvas).
    pub fn signed_area(&self) -> f32 {
        let mut sum = 0.;
        for (a, b) in self.edges() {
            sum += a.perp_dot(b);
        }
        sum / 2.
    }

    /// The absolute enclosed area.
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Whether the winding is clockwise (in y-up coordinates).
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.
    }

    /// The total length of all edges, including the closing edge.
    pub fn perimeter(&self) -> f32 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    /// The area-weighted centroid. Falls back to the vertex average
    /// when the polygon encloses (nearly) no area.
    pub fn centroid(&self) -> Vec2 {
        let area = self.signed_area();
        if area.abs() <= f32::EPSILON {
            if self.points.is_empty() {
                return Vec2::ZERO;
            }
            return self.points.iter().sum::<Vec2>() / self.points.len() as f32;
        }

        let mut sum = Vec2::ZERO;
        for (a, b) in self.edges() {
            sum += (a + b) * a.perp_dot(b);
        }
        sum / (6. * area)
    }

    /// The smallest rectangle containing all points, or `None`
    /// for an empty polygon.
    pub fn bounding_box(&self) -> Option<Rectangle> {
        let first = *self.points.first()?;
        let (min, max) = self.points.iter().fold((first, first), |(min, max), &p| {
            (min.min(p), max.max(p))
        });
        Some(Rectangle::from_corners(min, max))
    }

    /// Whether the polygon contains `point`, by even-odd ray
    /// casting. Consistent with filling under [`FillRule::EvenOdd`](crate::FillRule).
    pub fn contains(&self, point: Vec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn translated(&self, translation: Vec2) -> Self {
        Self::new(self.points.iter().map(|&p| p + translation).collect())
    }

    pub fn scaled(&self, scale: Vec2) -> Self {
        Self::new(self.points.iter().map(|&p| p * scale).collect())
    }

    /// Rotates all points around `center` by `angle` radians.
    pub fn rotated_about(&self, center: Vec2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.points
                .iter()
                .map(|&p| {
                    let rel = p - center;
                    center + vec2(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos)
                })
                .collect(),
        )
    }

    /// Converts the polygon to a closed path.
    pub fn to_path(&self) -> Path {
        Path::builder().polygon(self).build()
    }

    /// Offsets every edge by `distance` along its normal and
    /// rebuilds the vertices from the miter intersections of
    /// adjacent offset edges.
    ///
    /// Positive distances grow counterclockwise polygons (y-up) and
    /// shrink clockwise ones. This is a best-effort operation: large
    /// distances relative to the feature size, or sharply concave
    /// corners, can produce self-intersecting output. Polygons with
    /// fewer than three points are returned unchanged.
    pub fn offset(&self, distance: f32) -> Self {
        if self.points.len() < 3 {
            return self.clone();
        }

        let n = self.points.len();
        let mut result = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.points[(i + n - 1) % n];
            let current = self.points[i];
            let next = self.points[(i + 1) % n];

            let normal_in = edge_normal(prev, current);
            let normal_out = edge_normal(current, next);
            let (normal_in, normal_out) = match (normal_in, normal_out) {
                (Some(a), Some(b)) => (a, b),
                // Zero-length edge: reuse whichever neighbor exists.
                (Some(a), None) => (a, a),
                (None, Some(b)) => (b, b),
                (None, None) => {
                    result.push(current);
                    continue;
                }
            };

            let bisector = normal_in + normal_out;
            let denom = bisector.dot(normal_in);
            if denom <= PARALLEL_EPSILON {
                // Edges double back on themselves; a miter would shoot
                // off to infinity.
                result.push(current + normal_out * distance);
            } else {
                result.push(current + bisector * (distance / denom));
            }
        }
        Self::new(result)
    }

    /// Rounds every corner with a quadratic curve.
    ///
    /// The rounding starts and ends `radius` away from each vertex
    /// along its adjacent edges, clamped to half of either edge's
    /// length so neighboring corners never overlap.
    pub fn smooth(&self, radius: f32) -> Path {
        if self.points.len() < 3 {
            return self.to_path();
        }

        let n = self.points.len();
        let corner = |i: usize| {
            let prev = self.points[(i + n - 1) % n];
            let current = self.points[i];
            let next = self.points[(i + 1) % n];

            let entry_limit = current.distance(prev) / 2.;
            let exit_limit = current.distance(next) / 2.;
            let entry = current
                + (prev - current).normalize_or_zero() * radius.min(entry_limit);
            let exit = current
                + (next - current).normalize_or_zero() * radius.min(exit_limit);
            (entry, current, exit)
        };

        let (first_entry, _, _) = corner(0);
        let mut builder = Path::builder().move_to(first_entry);
        for i in 0..n {
            let (entry, vertex, exit) = corner(i);
            if i != 0 {
                builder = builder.line_to(entry);
            }
            builder = builder.quad_to(vertex, exit);
        }
        builder.close()
    }

    /// Reduces the number of points with Douglas-Peucker
    /// simplification. The first and last points always survive.
    pub fn simplify(&self, tolerance: f32) -> Self {
        if self.points.len() <= 2 {
            return self.clone();
        }

        let mut keep = vec![false; self.points.len()];
        keep[0] = true;
        keep[self.points.len() - 1] = true;
        douglas_peucker(&self.points, 0, self.points.len() - 1, tolerance, &mut keep);

        Self::new(
            self.points
                .iter()
                .zip(&keep)
                .filter_map(|(&p, &k)| k.then_some(p))
                .collect(),
        )
    }

    /// Iterates over all edges, including the closing edge.
    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<T: IntoIterator<Item = Vec2>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Fits a Catmull-Rom spline through the given points, producing
/// a path of cubic Bezier curves that passes through every point.
///
/// With `closed`, the spline wraps around; otherwise the end
/// tangents are derived from the terminal segments. Fewer than
/// three points degrade to a line.
pub fn fit(points: &[Vec2], closed: bool) -> Path {
    match points {
        [] => return Path::builder().build(),
        [point] => return Path::builder().move_to(*point).build(),
        [a, b] => return Path::builder().move_to(*a).line_to(*b).build(),
        _ => {}
    }

    let n = points.len();
    let at = |i: isize| -> Vec2 {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };

    let segments = if closed { n } else { n - 1 };
    let mut builder = Path::builder().move_to(points[0]);
    for i in 0..segments {
        let i = i as isize;
        let p0 = at(i - 1);
        let p1 = at(i);
        let p2 = at(i + 1);
        let p3 = at(i + 2);

        // Uniform Catmull-Rom in cubic Bezier form.
        builder = builder.cubic_to(p1 + (p2 - p0) / 6., p2 - (p3 - p1) / 6., p2);
    }
    if closed {
        builder.close()
    } else {
        builder.build()
    }
}

/// Normal of the edge `a -> b`: the edge direction rotated a
/// quarter turn toward negative y. `None` for zero-length edges.
fn edge_normal(a: Vec2, b: Vec2) -> Option<Vec2> {
    let edge = b - a;
    if edge.length_squared() <= f32::EPSILON {
        None
    } else {
        let edge = edge.normalize();
        Some(vec2(edge.y, -edge.x))
    }
}

fn douglas_peucker(points: &[Vec2], start: usize, end: usize, tolerance: f32, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut furthest = start;
    let mut max_distance = 0.;
    for i in start + 1..end {
        let distance = perpendicular_distance(points[i], points[start], points[end]);
        if distance > max_distance {
            max_distance = distance;
            furthest = i;
        }
    }

    if max_distance > tolerance {
        keep[furthest] = true;
        douglas_peucker(points, start, furthest, tolerance, keep);
        douglas_peucker(points, furthest, end, tolerance, keep);
    }
}

fn perpendicular_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let chord = b - a;
    let length = chord.length();
    if length <= f32::EPSILON {
        return point.distance(a);
    }
    (chord.perp_dot(point - a) / length).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            vec2(0., 0.),
            vec2(10., 0.),
            vec2(10., 10.),
            vec2(0., 10.),
        ])
    }

    #[test]
    fn area_and_orientation() {
        let square = square();
        assert_eq!(square.signed_area(), 100.);
        assert!(!square.is_clockwise());

        let mut reversed = square.clone();
        reversed.reverse();
        assert_eq!(reversed.signed_area(), -100.);
        assert!(reversed.is_clockwise());
        assert_eq!(reversed.area(), 100.);
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        assert_eq!(square().perimeter(), 40.);
    }

    #[test]
    fn centroid_of_square() {
        assert!(square().centroid().distance(vec2(5., 5.)) < 1e-4);
    }

    #[test]
    fn centroid_of_degenerate_polygon() {
        let line = Polygon::new(vec![vec2(0., 0.), vec2(4., 0.)]);
        assert_eq!(line.centroid(), vec2(2., 0.));
    }

    #[test]
    fn contains_even_odd() {
        let square = square();
        assert!(square.contains(vec2(5., 5.)));
        assert!(!square.contains(vec2(15., 5.)));
        assert!(!square.contains(vec2(-1., -1.)));
    }

    #[test]
    fn bounding_box() {
        let bounds = square().bounding_box().unwrap();
        assert_eq!(bounds.position(), vec2(0., 0.));
        assert_eq!(bounds.size(), vec2(10., 10.));
        assert!(Polygon::default().bounding_box().is_none());
    }

    #[test]
    fn offset_grows_square() {
        let grown = square().offset(2.);
        let bounds = grown.bounding_box().unwrap();
        assert!(bounds.position().distance(vec2(-2., -2.)) < 1e-3);
        assert!(bounds.size().distance(vec2(14., 14.)) < 1e-3);
        assert!((grown.area() - 196.).abs() < 1e-2);
    }

    #[test]
    fn offset_shrinks_with_negative_distance() {
        let shrunk = square().offset(-2.);
        assert!((shrunk.area() - 36.).abs() < 1e-2);
    }

    #[test]
    fn offset_degenerate_passthrough() {
        let line = Polygon::new(vec![vec2(0., 0.), vec2(1., 0.)]);
        assert_eq!(line.offset(5.), line);
    }

    #[test]
    fn smooth_stays_inside_bounds() {
        let path = square().smooth(3.);
        for polygon in path.flatten(0.01) {
            for point in polygon.points() {
                assert!(point.x >= -0.01 && point.x <= 10.01);
                assert!(point.y >= -0.01 && point.y <= 10.01);
            }
        }
    }

    #[test]
    fn smooth_clamps_radius() {
        // A huge radius must not push curve anchors past edge midpoints.
        let path = square().smooth(1000.);
        assert!(!path.is_empty());
    }

    #[test]
    fn fit_passes_through_points() {
        let points = [vec2(0., 0.), vec2(10., 5.), vec2(20., -5.), vec2(30., 0.)];
        let path = fit(&points, false);

        let polygons = path.flatten(0.01);
        let polyline = polygons[0].points();
        for target in points {
            let closest = polyline
                .iter()
                .map(|p| p.distance(target))
                .fold(f32::MAX, f32::min);
            assert!(closest < 0.05, "spline misses {target}");
        }
    }

    #[test]
    fn fit_two_points_is_a_line() {
        let path = fit(&[vec2(0., 0.), vec2(5., 5.)], false);
        assert_eq!(path.flatten(0.1)[0].points().len(), 2);
    }

    #[test]
    fn simplify_drops_collinear_points() {
        let polygon = Polygon::new(vec![
            vec2(0., 0.),
            vec2(5., 0.01),
            vec2(10., 0.),
            vec2(10., 10.),
        ]);
        let simplified = polygon.simplify(0.1);
        assert_eq!(
            simplified.points(),
            &[vec2(0., 0.), vec2(10., 0.), vec2(10., 10.)]
        );
    }

    #[test]
    fn rotate_about_center() {
        let rotated = square().rotated_about(vec2(5., 5.), std::f32::consts::PI);
        assert!(rotated.points()[0].distance(vec2(10., 10.)) < 1e-4);
    }
}
