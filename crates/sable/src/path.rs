use std::f32::consts::FRAC_PI_2;

use glam::{vec2, Vec2};

use crate::Polygon;

/// Recursion limit for curve flattening. Keeps degenerate
/// tolerances from overflowing the stack.
const MAX_FLATTEN_DEPTH: u32 = 16;

/// A vector path composed of line segments and Bezier curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Creates a path directly from a list of segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        self.segments.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Converts the path to polygons, one per subpath.
    ///
    /// Curves are approximated by line sequences whose control points
    /// deviate from their chords by at most `tolerance`. Polygons are
    /// implicitly closed, so explicit `Close` segments add no points.
    ///
    /// Subpaths with fewer than two points are discarded.
    ///
    /// # Panics
    /// Panics if `tolerance` is not positive.
    pub fn flatten(&self, tolerance: f32) -> Vec<Polygon> {
        assert!(tolerance > 0., "flatten tolerance must be positive");

        let mut polygons = Vec::new();
        let mut points: Vec<Vec2> = Vec::new();
        let mut pen = Vec2::ZERO;

        let mut finish = |points: &mut Vec<Vec2>| {
            if points.len() >= 2 {
                polygons.push(Polygon::new(std::mem::take(points)));
            } else {
                points.clear();
            }
        };

        for segment in self.segments() {
            match segment {
                PathSegment::MoveTo(point) => {
                    finish(&mut points);
                    points.push(point);
                    pen = point;
                }
                PathSegment::LineTo(point) => {
                    if points.is_empty() {
                        points.push(pen);
                    }
                    points.push(point);
                    pen = point;
                }
                PathSegment::QuadTo { control, end } => {
                    if points.is_empty() {
                        points.push(pen);
                    }
                    flatten_quad(pen, control, end, tolerance, 0, &mut points);
                    pen = end;
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    if points.is_empty() {
                        points.push(pen);
                    }
                    flatten_cubic(pen, control1, control2, end, tolerance, 0, &mut points);
                    pen = end;
                }
                PathSegment::Close => finish(&mut points),
            }
        }
        finish(&mut points);

        polygons
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo {
        control: Vec2,
        end: Vec2,
    },
    CubicTo {
        control1: Vec2,
        control2: Vec2,
        end: Vec2,
    },
    Close,
}

/// A builder for a [`Path`].
///
/// Maintains a current "pen position," which is initially
/// set to the origin.
pub struct PathBuilder {
    path: Path,
    pen: Vec2,
    has_subpath: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path {
                segments: Vec::new(),
            },
            pen: Vec2::ZERO,
            has_subpath: false,
        }
    }

    /// Moves the pen position to the given point without
    /// drawing a segment to it.
    pub fn move_to(mut self, point: Vec2) -> Self {
        self.push_segment(PathSegment::MoveTo(point));
        self
    }

    /// Adds a line segment from the pen position to the given
    /// point, then sets the pen position to `point`.
    pub fn line_to(mut self, point: Vec2) -> Self {
        self.push_segment(PathSegment::LineTo(point));
        self
    }

    /// Adds a quadratic Bezier curve from the pen position
    /// to `end` using the given control point. The pen
    /// position is set to `end`.
    pub fn quad_to(mut self, control: Vec2, end: Vec2) -> Self {
        self.push_segment(PathSegment::QuadTo { control, end });
        self
    }

    /// Adds a cubic Bezier curve from the pen position
    /// to `end` using the given control points. The pen position
    /// is set to `end`.
    pub fn cubic_to(mut self, control1: Vec2, control2: Vec2, end: Vec2) -> Self {
        self.push_segment(PathSegment::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Adds a circular arc around `center`, starting at `start_angle`
    /// and sweeping by `sweep` radians (positive angles sweep toward
    /// positive `y`).
    ///
    /// The arc is approximated by cubic Bezier curves, one per quarter
    /// turn. A line segment connects the pen position to the start of the
    /// arc; if the path is empty, the arc starts a new subpath instead.
    pub fn arc(mut self, center: Vec2, radius: f32, start_angle: f32, sweep: f32) -> Self {
        let at = |angle: f32| center + radius * vec2(angle.cos(), angle.sin());

        let start = at(start_angle);
        self = if self.has_subpath {
            self.line_to(start)
        } else {
            self.move_to(start)
        };
        if sweep == 0. {
            return self;
        }

        let steps = (sweep.abs() / FRAC_PI_2).ceil().max(1.) as u32;
        let delta = sweep / steps as f32;
        // Standard control-point distance for a cubic arc approximation.
        let k = 4. / 3. * (delta / 4.).tan() * radius;

        let mut angle = start_angle;
        for _ in 0..steps {
            let next = angle + delta;
            let tangent = |a: f32| vec2(-a.sin(), a.cos());
            let end = at(next);
            self = self.cubic_to(at(angle) + k * tangent(angle), end - k * tangent(next), end);
            angle = next;
        }
        self
    }

    /// Appends a polygon as a closed subpath.
    ///
    /// Empty polygons are ignored.
    pub fn polygon(mut self, polygon: &Polygon) -> Self {
        let mut points = polygon.points().iter().copied();
        match points.next() {
            Some(first) => self = self.move_to(first),
            None => return self,
        }
        for point in points {
            self = self.line_to(point);
        }
        self.push_segment(PathSegment::Close);
        self
    }

    /// Closes the path, then builds it.
    ///
    /// Closing a path adds a line segment to the initial point in the path.
    pub fn close(mut self) -> Path {
        self.push_segment(PathSegment::Close);
        self.build()
    }

    /// Builds the path.
    pub fn build(self) -> Path {
        self.path
    }

    fn push_segment(&mut self, segment: PathSegment) {
        match segment {
            PathSegment::MoveTo(point) => {
                self.pen = point;
                self.has_subpath = true;
            }
            PathSegment::LineTo(point) | PathSegment::QuadTo { end: point, .. } => {
                self.pen = point;
                self.has_subpath = true;
            }
            PathSegment::CubicTo { end, .. } => {
                self.pen = end;
                self.has_subpath = true;
            }
            PathSegment::Close => self.has_subpath = false,
        }
        self.path.segments.push(segment);
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance from `point` to the segment `start..end`, used
/// as the flatness criterion for curve subdivision.
fn deviation_from_chord(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let chord = end - start;
    let length_squared = chord.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(chord) / length_squared).clamp(0., 1.);
    point.distance(start + chord * t)
}

fn flatten_quad(p0: Vec2, c: Vec2, p1: Vec2, tolerance: f32, depth: u32, out: &mut Vec<Vec2>) {
    if depth >= MAX_FLATTEN_DEPTH || deviation_from_chord(c, p0, p1) <= tolerance {
        out.push(p1);
        return;
    }

    // de Casteljau split at t = 0.5
    let left = p0.lerp(c, 0.5);
    let right = c.lerp(p1, 0.5);
    let mid = left.lerp(right, 0.5);
    flatten_quad(p0, left, mid, tolerance, depth + 1, out);
    flatten_quad(mid, right, p1, tolerance, depth + 1, out);
}

fn flatten_cubic(
    p0: Vec2,
    c1: Vec2,
    c2: Vec2,
    p1: Vec2,
    tolerance: f32,
    depth: u32,
    out: &mut Vec<Vec2>,
) {
    let flat = deviation_from_chord(c1, p0, p1) <= tolerance
        && deviation_from_chord(c2, p0, p1) <= tolerance;
    if depth >= MAX_FLATTEN_DEPTH || flat {
        out.push(p1);
        return;
    }

    let ab = p0.lerp(c1, 0.5);
    let bc = c1.lerp(c2, 0.5);
    let cd = c2.lerp(p1, 0.5);
    let abc = ab.lerp(bc, 0.5);
    let bcd = bc.lerp(cd, 0.5);
    let mid = abc.lerp(bcd, 0.5);
    flatten_cubic(p0, ab, abc, mid, tolerance, depth + 1, out);
    flatten_cubic(mid, bcd, cd, p1, tolerance, depth + 1, out);
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use super::*;

    #[test]
    fn flatten_lines_only() {
        let path = Path::builder()
            .move_to(vec2(0., 0.))
            .line_to(vec2(10., 0.))
            .line_to(vec2(10., 10.))
            .close();

        let polygons = path.flatten(0.1);
        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0].points(),
            &[vec2(0., 0.), vec2(10., 0.), vec2(10., 10.)]
        );
    }

    #[test]
    fn flatten_splits_subpaths() {
        let path = Path::builder()
            .move_to(vec2(0., 0.))
            .line_to(vec2(1., 0.))
            .move_to(vec2(5., 5.))
            .line_to(vec2(6., 5.))
            .build();

        assert_eq!(path.flatten(0.1).len(), 2);
    }

    #[test]
    fn flatten_curve_stays_within_tolerance() {
        let path = Path::builder()
            .move_to(vec2(0., 0.))
            .quad_to(vec2(50., 100.), vec2(100., 0.))
            .build();

        let polygons = path.flatten(0.25);
        let points = polygons[0].points();
        assert!(points.len() > 3);

        // Every flattened point must lie on the curve's side of things:
        // check a midpoint sample is close to the polyline.
        let on_curve = |t: f32| {
            let p0 = vec2(0., 0.);
            let c = vec2(50., 100.);
            let p1 = vec2(100., 0.);
            p0.lerp(c, t).lerp(c.lerp(p1, t), t)
        };
        for i in 0..=20 {
            let sample = on_curve(i as f32 / 20.);
            let distance = points
                .windows(2)
                .map(|w| deviation_from_chord(sample, w[0], w[1]))
                .fold(f32::MAX, f32::min);
            assert!(distance < 0.5, "sample {sample} too far from polyline");
        }
    }

    #[test]
    fn degenerate_subpaths_discarded() {
        let path = Path::builder()
            .move_to(vec2(1., 1.))
            .move_to(vec2(2., 2.))
            .line_to(vec2(3., 2.))
            .build();

        let polygons = path.flatten(0.1);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].points()[0], vec2(2., 2.));
    }

    #[test]
    fn arc_endpoints() {
        let path = Path::builder().arc(vec2(0., 0.), 10., 0., PI).build();
        let polygons = path.flatten(0.05);
        let points = polygons[0].points();

        assert!(points[0].distance(vec2(10., 0.)) < 1e-4);
        assert!(points[points.len() - 1].distance(vec2(-10., 0.)) < 1e-3);

        // All points stay on the circle.
        for point in points {
            assert!((point.length() - 10.).abs() < 0.1, "{point} off the arc");
        }
    }

    #[test]
    fn full_circle_arc_closes() {
        let path = Path::builder().arc(vec2(5., 5.), 2., 0., TAU).build();
        let polygons = path.flatten(0.01);
        let points = polygons[0].points();
        assert!(points[0].distance(points[points.len() - 1]) < 1e-3);
    }
}
