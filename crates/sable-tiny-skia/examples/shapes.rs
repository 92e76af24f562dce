//! Renders a sampler of primitives, shapes and blends to `shapes.png`.

use std::f32::consts::{FRAC_PI_2, PI};

use sable::{
    glam::vec2, shapes, Blend, BorderRadii, Canvas, Circle, Color, Context, DashPair, LineJoin,
    Rectangle, RoundedRectangle,
};
use sable_tiny_skia::{TinySkiaBackend, TinySkiaLayer};

fn main() {
    env_logger::init();

    let mut context = Context::new(TinySkiaBackend::new());
    let mut layer = context.create_layer(640, 480, 1.);
    layer.fill(Color::WHITE);

    let mut canvas = Canvas::new();

    // Rounded rectangle with a linear blend.
    let card = RoundedRectangle::new(
        Rectangle::new(vec2(40., 40.), vec2(160., 120.)),
        BorderRadii::all(18.),
    );
    let blend = Blend::linear(vec2(40., 40.), vec2(200., 160.))
        .stop(0., "#3a7bd5".parse::<Color>().unwrap())
        .stop(1., "#00d2ff".parse::<Color>().unwrap());
    canvas.fill_primitive(card).blend(&blend).draw();

    // A star and a hexagon, stroked and filled.
    let star = shapes::star(vec2(320., 100.), 24., 56., 5, -FRAC_PI_2);
    canvas
        .fill_polygon(&star)
        .solid_color(Color::from_hsv(48., 0.9, 1.))
        .draw();
    canvas
        .stroke_polygon(&star)
        .width(3.)
        .line_join(LineJoin::Round)
        .solid_color(Color::BLACK)
        .draw();

    let hexagon = shapes::ngon(vec2(500., 100.), 56., 6, 0.);
    canvas
        .stroke_polygon(&hexagon)
        .width(2.)
        .dash(0., [DashPair::splat(6.)])
        .solid_color(Color::from_hsv(280., 0.7, 0.8))
        .draw();

    // Pie and annular sector.
    canvas
        .fill_path(&shapes::pie(vec2(120., 320.), 80., -FRAC_PI_2, 1.8 * PI))
        .solid_color(Color::from_hsv(10., 0.8, 0.9))
        .draw();
    canvas
        .fill_path(&shapes::sector(vec2(320., 320.), 40., 80., 0., PI))
        .solid_color(Color::from_hsv(140., 0.7, 0.7))
        .draw();

    // A circle with a radial blend, clipped to a square.
    canvas.with_save(|canvas| {
        canvas.clip_with_primitive(Rectangle::new(vec2(440., 260.), vec2(120., 120.)));
        let glow = Blend::radial(vec2(500., 320.), 0., vec2(500., 320.), 70.)
            .stop(0., Color::WHITE)
            .stop(1., "#8e2de2".parse::<Color>().unwrap());
        canvas
            .fill_primitive(Circle::new(vec2(500., 320.), 70.))
            .blend(&glow)
            .draw();
    });

    canvas.render_to_layer(&mut context, &mut layer);

    let png = layer
        .inner()
        .as_any()
        .downcast_ref::<TinySkiaLayer>()
        .unwrap()
        .encode_png()
        .expect("failed to encode PNG");
    std::fs::write("shapes.png", png).expect("failed to write shapes.png");
}
