//! Demonstrates the polygon toolbox: offsetting, corner smoothing,
//! spline fitting and circle intersections. Writes `polygons.png`.

use std::f32::consts::FRAC_PI_2;

use sable::{
    geometry, glam::vec2, shapes, Canvas, Circle, Color, Context, Polygon,
};
use sable_tiny_skia::{TinySkiaBackend, TinySkiaLayer};

fn main() {
    env_logger::init();

    let mut context = Context::new(TinySkiaBackend::new());
    let mut layer = context.create_layer(640, 480, 1.);
    layer.fill(Color::WHITE);

    let mut canvas = Canvas::new();

    // Concentric offsets of a star.
    let star = shapes::star(vec2(160., 160.), 40., 90., 6, -FRAC_PI_2);
    for i in 0..4 {
        let ring = star.offset(-8. * i as f32);
        canvas
            .stroke_polygon(&ring)
            .width(2.)
            .solid_color(Color::from_hsv(200. + 30. * i as f32, 0.8, 0.8))
            .draw();
    }

    // A smoothed polygon next to its sharp original.
    let zigzag = Polygon::new(vec![
        vec2(360., 80.),
        vec2(460., 120.),
        vec2(400., 200.),
        vec2(520., 240.),
        vec2(360., 260.),
    ]);
    canvas
        .stroke_polygon(&zigzag)
        .width(1.)
        .solid_color(Color::rgb(180, 180, 180))
        .draw();
    canvas
        .fill_path(&zigzag.smooth(24.))
        .solid_color(Color::from_hsv(20., 0.7, 0.95).with_alpha(170))
        .draw();

    // A spline through scattered points.
    let samples: Vec<_> = (0..8)
        .map(|i| {
            let x = 80. + 60. * i as f32;
            vec2(x, 380. + 50. * (i as f32 * 1.3).sin())
        })
        .collect();
    canvas
        .stroke_path(&sable::fit(&samples, false))
        .width(3.)
        .solid_color(Color::from_hsv(260., 0.7, 0.7))
        .draw();
    for sample in &samples {
        canvas
            .fill_primitive(Circle::new(*sample, 4.))
            .solid_color(Color::BLACK)
            .draw();
    }

    // Two circles and their intersection points.
    let a = Circle::new(vec2(480., 120.), 50.);
    let b = Circle::new(vec2(540., 120.), 50.);
    for circle in [a, b] {
        canvas
            .stroke_primitive(circle)
            .width(2.)
            .solid_color(Color::rgb(90, 90, 90))
            .draw();
    }
    for point in geometry::circle_circle_intersections(&a, &b) {
        canvas
            .fill_primitive(Circle::new(point, 5.))
            .solid_color(Color::RED)
            .draw();
    }

    canvas.render_to_layer(&mut context, &mut layer);

    let png = layer
        .inner()
        .as_any()
        .downcast_ref::<TinySkiaLayer>()
        .unwrap()
        .encode_png()
        .expect("failed to encode PNG");
    std::fs::write("polygons.png", png).expect("failed to write polygons.png");
}
