//! Constructors for common procedural shapes.
//!
//! Regular shapes come back as [`Polygon`]s; shapes with curved
//! boundaries come back as [`Path`]s built from arcs.

use std::f32::consts::TAU;

use glam::{vec2, Vec2};

use crate::{Path, Polygon};

/// A regular polygon with `sides` vertices on a circle of `radius`
/// around `center`. The first vertex sits at angle `rotation`.
///
/// # Panics
/// Panics if `sides < 3`.
pub fn ngon(center: Vec2, radius: f32, sides: u32, rotation: f32) -> Polygon {
    assert!(sides >= 3, "an ngon needs at least 3 sides");
    (0..sides)
        .map(|i| {
            let angle = rotation + TAU * i as f32 / sides as f32;
            center + radius * vec2(angle.cos(), angle.sin())
        })
        .collect()
}

/// A star with `points` tips, alternating between `outer_radius`
/// and `inner_radius` around `center`. The first tip sits at angle
/// `rotation`.
///
/// # Panics
/// Panics if `points < 2`.
pub fn star(center: Vec2, inner_radius: f32, outer_radius: f32, points: u32, rotation: f32) -> Polygon {
    assert!(points >= 2, "a star needs at least 2 points");
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = rotation + TAU * i as f32 / (points * 2) as f32;
            center + radius * vec2(angle.cos(), angle.sin())
        })
        .collect()
}

/// A pie slice: the region bounded by two radii and the arc
/// between them, starting at `start_angle` and sweeping by
/// `sweep` radians.
pub fn pie(center: Vec2, radius: f32, start_angle: f32, sweep: f32) -> Path {
    Path::builder()
        .move_to(center)
        .arc(center, radius, start_angle, sweep)
        .close()
}

/// An annular sector: the region between two concentric arcs,
/// connected by straight caps.
pub fn sector(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start_angle: f32,
    sweep: f32,
) -> Path {
    Path::builder()
        .arc(center, outer_radius, start_angle, sweep)
        .arc(center, inner_radius, start_angle + sweep, -sweep)
        .close()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn ngon_vertices() {
        let hexagon = ngon(vec2(0., 0.), 10., 6, 0.);
        assert_eq!(hexagon.len(), 6);
        assert!(hexagon.points()[0].distance(vec2(10., 0.)) < 1e-4);
        for point in hexagon.points() {
            assert!((point.length() - 10.).abs() < 1e-4);
        }

        // Area approaches the circle's as the side count grows.
        let expected = 6. * 10f32 * 10. * (TAU / 6.).sin() / 2.;
        assert!((hexagon.area() - expected).abs() < 1e-2);
    }

    #[test]
    fn star_alternates_radii() {
        let star = star(vec2(0., 0.), 4., 10., 5, FRAC_PI_2);
        assert_eq!(star.len(), 10);
        for (i, point) in star.points().iter().enumerate() {
            let expected = if i % 2 == 0 { 10. } else { 4. };
            assert!((point.length() - expected).abs() < 1e-4);
        }
        assert!(star.points()[0].distance(vec2(0., 10.)) < 1e-4);
    }

    #[test]
    fn pie_area() {
        // A quarter pie of radius 10.
        let path = pie(vec2(0., 0.), 10., 0., FRAC_PI_2);
        let polygon = &path.flatten(0.01)[0];
        let expected = PI * 100. / 4.;
        assert!((polygon.area() - expected).abs() < expected * 0.01);
        assert!(polygon.points()[0].distance(vec2(0., 0.)) < 1e-4);
    }

    #[test]
    fn sector_area() {
        let path = sector(vec2(0., 0.), 5., 10., 0., PI);
        let polygon = &path.flatten(0.01)[0];
        let expected = PI * (100. - 25.) / 2.;
        assert!((polygon.area() - expected).abs() < expected * 0.01);
    }
}
