//! A software rendering backend for `sable` that uses [`tiny-skia`](https://docs.rs/tiny-skia).

use std::{any::Any, mem};

use rustc_hash::FxHashMap;
use sable::{
    glam::Affine2, Backend, BackendLayer, Color, Command, CommandStream, FillRule, GradientStop,
    ImageId, Images, LineCap, LineJoin, PathSegment, Primitive, StrokeSettings, Vec2,
};
use tiny_skia::{
    ClipMask, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint, Point, RadialGradient,
    Rect, Shader, SpreadMode, Stroke, StrokeDash, Transform,
};

/// A `tiny-skia` rendering backend.
#[derive(Default)]
pub struct TinySkiaBackend {
    renderer: Renderer,
}

impl TinySkiaBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for TinySkiaBackend {
    type Layer = TinySkiaLayer;

    fn create_layer(
        &self,
        physical_width: u32,
        physical_height: u32,
        hidpi_factor: f32,
    ) -> TinySkiaLayer {
        TinySkiaLayer {
            pixmap: Pixmap::new(physical_width, physical_height)
                .expect("invalid layer dimensions"),
            hidpi_factor,
        }
    }

    fn render_to_layer(
        &mut self,
        layer: &mut TinySkiaLayer,
        commands: CommandStream,
        images: &Images,
    ) {
        self.renderer.render_to_layer(layer, commands, images);
    }
}

/// A pixel buffer rendered to by [`TinySkiaBackend`].
pub struct TinySkiaLayer {
    pixmap: Pixmap,
    hidpi_factor: f32,
}

impl TinySkiaLayer {
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the layer contents as a PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        self.pixmap.encode_png()
    }
}

impl BackendLayer for TinySkiaLayer {
    fn fill(&mut self, color: Color) {
        self.pixmap.fill(convert_color(color));
    }

    fn to_argb(&self) -> Vec<u32> {
        self.pixmap
            .pixels()
            .iter()
            .map(|pixel| {
                let pixel = pixel.demultiply();
                (pixel.alpha() as u32) << 24
                    | (pixel.red() as u32) << 16
                    | (pixel.green() as u32) << 8
                    | pixel.blue() as u32
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

enum CurrentShader {
    Solid(tiny_skia::Color),
    LinearGradient {
        stops: Vec<tiny_skia::GradientStop>,
        start: Vec2,
        end: Vec2,
    },
    RadialGradient {
        stops: Vec<tiny_skia::GradientStop>,
        start: Vec2,
        end: Vec2,
        radius: f32,
    },
}

impl CurrentShader {
    fn stops_mut(&mut self) -> Option<&mut Vec<tiny_skia::GradientStop>> {
        match self {
            CurrentShader::Solid(_) => None,
            CurrentShader::LinearGradient { stops, .. }
            | CurrentShader::RadialGradient { stops, .. } => Some(stops),
        }
    }
}

struct Renderer {
    shader: CurrentShader,
    object_transform: Transform,
    paint_transform: Transform,
    path_builder: PathBuilder,
    dashes: Vec<f32>,
    clip_mask: ClipMask,
    clip_mask_enabled: bool,
    /// Images converted to premultiplied pixmaps, lazily.
    /// Images are immutable once registered, so entries never go stale.
    image_cache: FxHashMap<ImageId, Pixmap>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            shader: CurrentShader::Solid(tiny_skia::Color::BLACK),
            object_transform: Transform::identity(),
            paint_transform: Transform::identity(),
            path_builder: PathBuilder::new(),
            dashes: Vec::new(),
            clip_mask: ClipMask::new(),
            clip_mask_enabled: false,
            image_cache: FxHashMap::default(),
        }
    }
}

impl Renderer {
    pub fn render_to_layer(
        &mut self,
        layer: &mut TinySkiaLayer,
        commands: CommandStream,
        images: &Images,
    ) {
        for command in commands {
            self.execute_command(layer, command, images);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.path_builder.clear();
        self.dashes.clear();
        self.object_transform = Transform::identity();
        self.paint_transform = Transform::identity();
        self.clip_mask_enabled = false;
        self.shader = CurrentShader::Solid(tiny_skia::Color::BLACK);
    }

    fn paint(&self) -> Paint {
        Paint {
            anti_alias: true,
            shader: match &self.shader {
                CurrentShader::Solid(color) => Shader::SolidColor(*color),
                CurrentShader::LinearGradient { stops, start, end } => LinearGradient::new(
                    convert_point(*start),
                    convert_point(*end),
                    stops.clone(),
                    SpreadMode::Pad,
                    self.paint_transform,
                )
                .expect("invalid linear gradient"),
                CurrentShader::RadialGradient {
                    stops,
                    start,
                    end,
                    radius,
                } => RadialGradient::new(
                    convert_point(*start),
                    convert_point(*end),
                    *radius,
                    stops.clone(),
                    SpreadMode::Pad,
                    self.paint_transform,
                )
                .expect("invalid radial gradient"),
            },
            ..Default::default()
        }
    }

    fn object_transform(&self, hidpi_factor: f32) -> Transform {
        self.object_transform.pre_scale(hidpi_factor, hidpi_factor)
    }

    fn push_path_segment(&mut self, segment: PathSegment) {
        match segment {
            PathSegment::MoveTo(pos) => self.path_builder.move_to(pos.x, pos.y),
            PathSegment::LineTo(pos) => self.path_builder.line_to(pos.x, pos.y),
            PathSegment::QuadTo { control, end } => self
                .path_builder
                .quad_to(control.x, control.y, end.x, end.y),
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => self
                .path_builder
                .cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathSegment::Close => self.path_builder.close(),
        }
    }

    fn push_primitive_to_path(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Rectangle(rect) => self.path_builder.push_rect(
                rect.position().x,
                rect.position().y,
                rect.size().x,
                rect.size().y,
            ),
            Primitive::Circle(circle) => {
                self.path_builder
                    .push_circle(circle.center().x, circle.center().y, circle.radius())
            }
            Primitive::Ellipse(ellipse) => self.path_builder.push_oval(
                Rect::from_xywh(
                    ellipse.rectangle().position().x,
                    ellipse.rectangle().position().y,
                    ellipse.rectangle().size().x,
                    ellipse.rectangle().size().y,
                )
                .expect("invalid ellipse bounds"),
            ),
            // tiny-skia has no rounded-rect primitive; stage its
            // Bezier approximation instead.
            Primitive::RoundedRectangle(rounded_rect) => {
                for segment in rounded_rect.to_path().segments() {
                    self.push_path_segment(segment);
                }
            }
        }
    }

    fn execute_command(&mut self, layer: &mut TinySkiaLayer, command: Command, images: &Images) {
        match command {
            Command::UseSolidPaint(color) => {
                self.shader = CurrentShader::Solid(convert_color(color));
            }
            Command::UseLinearGradientPaint { start, end } => {
                self.shader = CurrentShader::LinearGradient {
                    stops: Vec::new(),
                    start,
                    end,
                };
            }
            Command::UseRadialGradientPaint { start, end, radius } => {
                self.shader = CurrentShader::RadialGradient {
                    stops: Vec::new(),
                    start,
                    end,
                    radius,
                };
            }
            Command::PushGradientStop(stop) => match self.shader.stops_mut() {
                Some(stops) => stops.push(convert_gradient_stop(stop)),
                None => panic!("push gradient stop when paint is not a gradient"),
            },
            Command::SetObjectTransform(trans) => self.object_transform = convert_transform(trans),
            Command::SetPaintTransform(trans) => self.paint_transform = convert_transform(trans),
            Command::ClearPath => self.path_builder.clear(),
            Command::PushPathSegment(segment) => self.push_path_segment(segment),
            Command::SetClipToPath { fill_rule } => {
                self.set_clip_to_path(fill_rule, layer);
            }
            Command::SetClipToPrimitive { primitive } => {
                self.push_primitive_to_path(primitive);
                self.set_clip_to_path(FillRule::default(), layer);
            }
            Command::ClearClip => {
                self.clip_mask_enabled = false;
                // ClipMask clears itself automatically the next time set_path is called
            }
            Command::ClearDashPairs => self.dashes.clear(),
            Command::PushDashPair(pair) => {
                self.dashes.extend([pair.on(), pair.off()]);
            }
            Command::FillPath { fill_rule } => self.fill_path(layer, fill_rule),
            Command::FillPrimitive { primitive } => {
                self.push_primitive_to_path(primitive);
                self.fill_path(layer, FillRule::EvenOdd)
            }
            Command::StrokePath { stroke_settings } => self.stroke_path(&stroke_settings, layer),
            Command::StrokePrimitive {
                stroke_settings,
                primitive,
            } => {
                self.push_primitive_to_path(primitive);
                self.stroke_path(&stroke_settings, layer);
            }
            Command::DrawImage {
                image,
                position,
                scale,
                opacity,
            } => self.draw_image(layer, image, position, scale, opacity, images),
        }
    }

    fn clip_mask(&self) -> Option<&ClipMask> {
        self.clip_mask_enabled.then_some(&self.clip_mask)
    }

    fn fill_path(&mut self, layer: &mut TinySkiaLayer, fill_rule: FillRule) {
        self.with_current_path(|this, path| {
            layer.pixmap.fill_path(
                &path,
                &this.paint(),
                convert_fill_rule(fill_rule),
                this.object_transform(layer.hidpi_factor),
                this.clip_mask(),
            );
            path
        });
    }

    fn stroke_path(&mut self, settings: &StrokeSettings, layer: &mut TinySkiaLayer) {
        self.with_current_path(|this, path| {
            let dash = if this.dashes.is_empty() {
                None
            } else {
                Some(
                    StrokeDash::new(mem::take(&mut this.dashes), settings.dash_offset)
                        .expect("invalid dashes"),
                )
            };
            layer.pixmap.stroke_path(
                &path,
                &this.paint(),
                &Stroke {
                    width: settings.width,
                    line_cap: convert_line_cap(settings.line_cap),
                    line_join: convert_line_join(settings.line_join),
                    dash,
                    ..Default::default()
                },
                this.object_transform(layer.hidpi_factor),
                this.clip_mask(),
            );
            path
        });
    }

    fn set_clip_to_path(&mut self, fill_rule: FillRule, layer: &TinySkiaLayer) {
        self.with_current_path(|this, mut path| {
            path = path
                .transform(this.object_transform(layer.hidpi_factor))
                .expect("invalid transform");
            this.clip_mask.set_path(
                layer.pixmap.width(),
                layer.pixmap.height(),
                &path,
                convert_fill_rule(fill_rule),
                true,
            );
            this.clip_mask_enabled = true;
            path
        });
    }

    fn draw_image(
        &mut self,
        layer: &mut TinySkiaLayer,
        image: ImageId,
        position: Vec2,
        scale: Vec2,
        opacity: f32,
        images: &Images,
    ) {
        let source = match images.get(image) {
            Some(source) => source,
            None => {
                log::warn!("DrawImage references an unknown image; skipping");
                return;
            }
        };
        if !self.image_cache.contains_key(&image) {
            self.image_cache.insert(image, premultiply_image(source));
        }
        let pixmap = &self.image_cache[&image];

        let transform = self
            .object_transform(layer.hidpi_factor)
            .pre_translate(position.x, position.y)
            .pre_scale(scale.x, scale.y);
        layer.pixmap.draw_pixmap(
            0,
            0,
            pixmap.as_ref(),
            &PixmapPaint {
                opacity: opacity.clamp(0., 1.),
                ..Default::default()
            },
            transform,
            self.clip_mask(),
        );
    }

    fn with_current_path(
        &mut self,
        callback: impl FnOnce(&mut Self, tiny_skia::Path) -> tiny_skia::Path,
    ) {
        let builder = mem::take(&mut self.path_builder);
        let mut path = match builder.finish() {
            Some(path) => path,
            None => {
                log::warn!("attempted to render an empty or invalid path; skipping");
                return;
            }
        };
        path = callback(self, path);

        // Reuse the path builder's allocated space.
        // Note that this clears the builder, meaning a subsequent
        // draw command will use an empty path. However, the Canvas
        // always builds a path before every draw command, so
        // we need not worry. (Though this is an internal `sable`
        // implementation detail.)
        self.path_builder = path.clear();
    }
}

fn premultiply_image(image: &sable::Image) -> Pixmap {
    let mut pixmap =
        Pixmap::new(image.width(), image.height()).expect("invalid image dimensions");
    for (target, pixel) in pixmap
        .data_mut()
        .chunks_exact_mut(4)
        .zip(image.data().chunks_exact(4))
    {
        let premultiplied =
            tiny_skia::ColorU8::from_rgba(pixel[0], pixel[1], pixel[2], pixel[3]).premultiply();
        target.copy_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    pixmap
}

fn convert_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn convert_gradient_stop(stop: GradientStop) -> tiny_skia::GradientStop {
    tiny_skia::GradientStop::new(stop.position(), convert_color(stop.color()))
}

fn convert_transform(transform: Affine2) -> Transform {
    let cols = transform.to_cols_array();
    Transform::from_row(cols[0], cols[1], cols[2], cols[3], cols[4], cols[5])
}

fn convert_point(point: Vec2) -> Point {
    Point::from_xy(point.x, point.y)
}

fn convert_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn convert_line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

fn convert_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        FillRule::NonZero => tiny_skia::FillRule::Winding,
    }
}
