use sable::{
    glam::vec2, shapes, Blend, Canvas, Color, Context, DashPair, Image, Layer, Rectangle, Vec2,
};
use sable_tiny_skia::TinySkiaBackend;

fn setup(width: u32, height: u32, hidpi_factor: f32) -> (Context, Layer, Canvas) {
    let context = Context::new(TinySkiaBackend::new());
    let mut layer = context.create_layer(width, height, hidpi_factor);
    layer.fill(Color::WHITE);
    (context, layer, Canvas::new())
}

fn pixel(layer: &Layer, x: u32, y: u32) -> u32 {
    layer.to_argb()[(y * layer.physical_width() + x) as usize]
}

const WHITE: u32 = 0xffff_ffff;
const RED: u32 = 0xffff_0000;

#[test]
fn fill_covers_interior_only() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    canvas
        .fill_primitive(Rectangle::new(vec2(10., 10.), vec2(12., 12.)))
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 15, 15), RED);
    assert_eq!(pixel(&layer, 5, 5), WHITE);
    assert_eq!(pixel(&layer, 25, 25), WHITE);
}

#[test]
fn translate_moves_shapes() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    canvas.translate(vec2(10., 10.));
    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(5., 5.)))
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 12, 12), RED);
    assert_eq!(pixel(&layer, 2, 2), WHITE);
}

#[test]
fn hidpi_factor_scales_logical_units() {
    // A 10-unit logical rect on a 2x layer covers 20 physical pixels.
    let (mut context, mut layer, mut canvas) = setup(40, 40, 2.);
    assert_eq!(layer.logical_size(), vec2(20., 20.));

    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(10., 10.)))
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 15, 15), RED);
    assert_eq!(pixel(&layer, 25, 25), WHITE);
}

#[test]
fn clip_masks_out_drawing() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    canvas.clip_with_primitive(Rectangle::new(vec2(0., 0.), vec2(10., 10.)));
    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(32., 32.)))
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 5, 5), RED);
    assert_eq!(pixel(&layer, 20, 20), WHITE);
}

#[test]
fn clear_clip_restores_full_drawing_area() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    canvas.clip_with_primitive(Rectangle::new(vec2(0., 0.), vec2(4., 4.)));
    canvas.clear_clip();
    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(32., 32.)))
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 20, 20), RED);
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    let path = sable::Path::builder()
        .move_to(vec2(0., 10.))
        .line_to(vec2(32., 10.))
        .build();
    canvas
        .stroke_path(&path)
        .width(4.)
        .dash(0., [DashPair::splat(4.)])
        .solid_color(Color::RED)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 1, 10), RED);
    assert_eq!(pixel(&layer, 6, 10), WHITE);
    assert_eq!(pixel(&layer, 9, 10), RED);
}

#[test]
fn linear_gradient_shades_across() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    let blend = Blend::linear(vec2(0., 0.), vec2(32., 0.))
        .stop(0., Color::BLACK)
        .stop(1., Color::WHITE);
    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(32., 32.)))
        .blend(&blend)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    let red_channel = |x| (pixel(&layer, x, 16) >> 16) & 0xff;
    assert!(red_channel(2) < red_channel(16));
    assert!(red_channel(16) < red_channel(30));
}

#[test]
fn radial_gradient_shades_outward() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    let blend = Blend::radial(vec2(16., 16.), 0., vec2(16., 16.), 20.)
        .stop(0., Color::WHITE)
        .stop(1., Color::BLACK);
    canvas
        .fill_primitive(Rectangle::new(vec2(0., 0.), vec2(32., 32.)))
        .blend(&blend)
        .draw();
    canvas.render_to_layer(&mut context, &mut layer);

    let red_channel = |x, y| (pixel(&layer, x, y) >> 16) & 0xff;
    assert!(red_channel(16, 16) > red_channel(28, 16));
    assert!(red_channel(28, 16) > red_channel(1, 1));
}

#[test]
fn image_blit_with_scale() {
    let (mut context, mut layer, mut canvas) = setup(32, 32, 1.);

    let red = [255u8, 0, 0, 255].repeat(4);
    let image = context.add_image(Image::from_rgba8(2, 2, red));

    canvas.draw_image_with(image, vec2(4., 4.), Vec2::splat(8.), 1.);
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 10, 10), RED);
    assert_eq!(pixel(&layer, 2, 2), WHITE);
    assert_eq!(pixel(&layer, 25, 25), WHITE);
}

#[test]
fn translucent_image_premultiplies() {
    let (mut context, mut layer, mut canvas) = setup(16, 16, 1.);

    // Half-transparent red over a white layer blends to a pink.
    let translucent = [255u8, 0, 0, 128].repeat(16);
    let image = context.add_image(Image::from_rgba8(4, 4, translucent));

    canvas.draw_image(image, vec2(2., 2.));
    canvas.render_to_layer(&mut context, &mut layer);

    let blended = pixel(&layer, 4, 4);
    assert_eq!(blended >> 16 & 0xff, 0xff);
    let green = blended >> 8 & 0xff;
    assert!((120..=135).contains(&green), "green channel {green}");
    assert_eq!(pixel(&layer, 10, 10), WHITE);
}

#[test]
fn polygon_shapes_render() {
    let (mut context, mut layer, mut canvas) = setup(64, 64, 1.);

    let hexagon = shapes::ngon(vec2(32., 32.), 20., 6, 0.);
    canvas.fill_polygon(&hexagon).solid_color(Color::RED).draw();
    canvas.render_to_layer(&mut context, &mut layer);

    assert_eq!(pixel(&layer, 32, 32), RED);
    assert_eq!(pixel(&layer, 2, 2), WHITE);
}
