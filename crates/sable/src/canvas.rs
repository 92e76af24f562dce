use glam::{Affine2, Mat2, Vec2};

use crate::{
    backend::command::{Command, CommandBuffer},
    blend::{Blend, BlendGeometry},
    image::ImageId,
    primitive::Primitive,
    types::{DashPair, LineCap, LineJoin, StrokeSettings},
    Color, Context, FillRule, Layer, Path, Polygon,
};

#[cfg(feature = "text")]
use crate::text::{self, TextStyle};

/// A canvas to draw to.
///
/// Records a sequence of draw commands, then passes those
/// commands to the rendering backend.
///
/// The canvas maintains a _current transform_, which makes it stateful.
/// As a result, you want to ensure drawing operations happen in isolation.
/// A function that draws to a canvas, thus updating the canvas state, should
/// not affect any functions that come after it. To solve this problem, `sable`
/// offers a save/restore API to create a stack of canvas states. See the methods
/// [`save`](Canvas::save) and [`restore`](Canvas::restore).
///
/// Many methods return `self` to enable method chaining.
pub struct Canvas {
    commands: CommandBuffer,

    state_stack: Vec<State>,
    state: State,
}

impl Canvas {
    /// Creates a new canvas.
    pub fn new() -> Self {
        Self {
            commands: CommandBuffer::new(),
            state_stack: Vec::new(),
            state: State::default(),
        }
    }

    /// Translates the canvas.
    pub fn translate(&mut self, translation: Vec2) -> &mut Self {
        self.state.transform.translation += translation;
        self.emit_transform();
        self
    }

    /// Scales the canvas.
    pub fn scale(&mut self, scale: Vec2) -> &mut Self {
        self.state.transform = self.state.transform * Affine2::from_scale(scale);
        self.emit_transform();
        self
    }

    /// Rotates the canvas by the given angle in radians.
    pub fn rotate(&mut self, angle_in_radians: f32) -> &mut Self {
        self.state.transform = self.state.transform * Affine2::from_angle(angle_in_radians);
        self.emit_transform();
        self
    }

    /// Shears the canvas. `shear.x` tilts the y axis toward x and
    /// `shear.y` tilts the x axis toward y.
    pub fn shear(&mut self, shear: Vec2) -> &mut Self {
        let shear = Affine2::from_mat2(Mat2::from_cols(
            Vec2::new(1., shear.y),
            Vec2::new(shear.x, 1.),
        ));
        self.state.transform = self.state.transform * shear;
        self.emit_transform();
        self
    }

    /// Appends an arbitrary affine transform to the current transform.
    pub fn transform(&mut self, transform: Affine2) -> &mut Self {
        self.state.transform = self.state.transform * transform;
        self.emit_transform();
        self
    }

    /// The current cumulative transform.
    pub fn current_transform(&self) -> Affine2 {
        self.state.transform
    }

    /// Pushes the current state onto the state stack,
    /// allowing it to be restored later.
    pub fn save(&mut self) -> &mut Self {
        self.state_stack.push(self.state);
        self
    }

    /// Restores the next saved state in the canvas's state stack.
    ///
    /// # Panics
    /// Panics if there is no state to pop. This happens only when
    /// `restore()` is called more times than `save()`.
    pub fn restore(&mut self) -> &mut Self {
        self.state = self
            .state_stack
            .pop()
            .expect("called Canvas::restore() at the top of the state stack");
        if !self.state.has_clip {
            self.clear_clip();
        }
        self.emit_transform();
        self
    }

    /// Calls `save()`, executes the closure, and then calls `restore()`.
    pub fn with_save(&mut self, f: impl FnOnce(&mut Self)) {
        self.save();
        f(self);
        self.restore();
    }

    /// Clips the rendered content to a path's bounds.
    ///
    /// Overrides any previous clip.
    pub fn clip_with_path(&mut self, path: &Path) -> &mut Self {
        self.set_path(path);
        self.cmd(Command::SetClipToPath {
            fill_rule: FillRule::EvenOdd,
        });
        self.state.has_clip = true;
        self
    }

    /// Clips the rendered content to a primitive.
    ///
    /// Overrides any previous clip.
    pub fn clip_with_primitive(&mut self, primitive: impl Into<Primitive>) -> &mut Self {
        self.cmd(Command::SetClipToPrimitive {
            primitive: primitive.into(),
        });
        self.state.has_clip = true;
        self
    }

    /// Clears the current clip.
    pub fn clear_clip(&mut self) -> &mut Self {
        self.cmd(Command::ClearClip);
        self.state.has_clip = false;
        self
    }

    /// Creates a builder to fill the given path.
    pub fn fill_path(&mut self, path: &Path) -> Fill {
        self.set_path(path);
        Fill::new(self, None)
    }

    /// Creates a builder to fill the given primitive.
    pub fn fill_primitive(&mut self, primitive: impl Into<Primitive>) -> Fill {
        Fill::new(self, Some(primitive.into()))
    }

    /// Creates a builder to fill the given polygon, treated as closed.
    pub fn fill_polygon(&mut self, polygon: &Polygon) -> Fill {
        self.fill_path(&polygon.to_path())
    }

    /// Creates a builder to stroke the given path.
    pub fn stroke_path(&mut self, path: &Path) -> Stroke {
        self.set_path(path);
        Stroke::new(self, None)
    }

    /// Creates a builder to stroke the given primitive.
    pub fn stroke_primitive(&mut self, primitive: impl Into<Primitive>) -> Stroke {
        Stroke::new(self, Some(primitive.into()))
    }

    /// Creates a builder to stroke the given polygon's closed outline.
    pub fn stroke_polygon(&mut self, polygon: &Polygon) -> Stroke {
        self.stroke_path(&polygon.to_path())
    }

    /// Creates a builder to fill a run of text, with the baseline
    /// origin of the first glyph at `position`.
    ///
    /// Glyphs are placed by horizontal advance only; see the
    /// [`text`](crate::text) module docs for the limitations.
    #[cfg(feature = "text")]
    pub fn fill_text(
        &mut self,
        context: &Context,
        style: &TextStyle,
        position: Vec2,
        content: &str,
    ) -> Fill {
        let path = text::to_path(context.fonts(), style, position, content);
        self.fill_path(&path)
    }

    /// Draws an image with its top-left corner at `position`, at
    /// its natural size.
    pub fn draw_image(&mut self, image: ImageId, position: Vec2) -> &mut Self {
        self.draw_image_with(image, position, Vec2::ONE, 1.)
    }

    /// Draws an image with an additional scale factor and opacity.
    pub fn draw_image_with(
        &mut self,
        image: ImageId,
        position: Vec2,
        scale: Vec2,
        opacity: f32,
    ) -> &mut Self {
        self.cmd(Command::DrawImage {
            image,
            position,
            scale,
            opacity,
        })
    }

    /// Renders the canvas to the given [`Layer`], flushing
    /// the draw command buffer.
    ///
    /// The canvas can be reused after this call.
    pub fn render_to_layer(&mut self, context: &mut Context, layer: &mut Layer) {
        context.render_to_layer(layer, self.commands.to_stream());
        self.commands.clear();
        self.reset();
    }

    fn reset(&mut self) {
        self.state_stack.clear();
        self.state = State::default();
    }

    fn set_path(&mut self, path: &Path) {
        self.cmd(Command::ClearPath);
        for segment in path.segments() {
            self.cmd(Command::PushPathSegment(segment));
        }
    }

    fn set_solid_paint(&mut self, color: Color) {
        self.cmd(Command::UseSolidPaint(color));
    }

    fn set_blend_paint(&mut self, blend: &Blend) {
        // Backends require two or more stops per gradient. A blend
        // with fewer degrades to a solid paint.
        if blend.stops().len() < 2 {
            let color = match blend.stops() {
                [stop] => stop.color(),
                _ => Color::TRANSPARENT,
            };
            self.set_solid_paint(color);
            return;
        }

        match blend.geometry() {
            BlendGeometry::Linear { start, end } => {
                self.cmd(Command::UseLinearGradientPaint { start, end });
            }
            BlendGeometry::Radial {
                start_center,
                end_center,
                end_radius,
                ..
            } => {
                self.cmd(Command::UseRadialGradientPaint {
                    start: start_center,
                    end: end_center,
                    radius: end_radius,
                });
            }
        }
        for stop in blend.stops() {
            self.cmd(Command::PushGradientStop(*stop));
        }
    }

    fn emit_transform(&mut self) {
        let transform = self.state.transform;
        self.cmd(Command::SetObjectTransform(transform))
            .cmd(Command::SetPaintTransform(transform));
    }

    fn cmd(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    #[cfg(test)]
    fn take_commands(&mut self) -> Vec<Command> {
        let commands = self.commands.to_stream().collect();
        self.commands.clear();
        commands
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! set_paint_fns {
    () => {
        /// Uses a solid color for the paint.
        pub fn solid_color(mut self, color: impl Into<Color>) -> Self {
            self.canvas.set_solid_paint(color.into());
            self.set_paint = true;
            self
        }

        /// Uses a blend (linear or radial gradient) for the paint.
        pub fn blend(mut self, blend: &Blend) -> Self {
            self.canvas.set_blend_paint(blend);
            self.set_paint = true;
            self
        }
    };
}

/// Builder-like API to fill a shape.
///
/// Allows configuring the following:
/// * the paint - defaults to solid black
/// * the fill rule - defaults to EvenOdd
///
/// Call `draw()` to finish the draw operation.
#[must_use = "call Fill::draw() to finish the builder"]
pub struct Fill<'cv> {
    canvas: &'cv mut Canvas,
    primitive: Option<Primitive>,
    set_paint: bool,
    fill_rule: FillRule,
}

impl<'cv> Fill<'cv> {
    fn new(canvas: &'cv mut Canvas, primitive: Option<Primitive>) -> Self {
        Self {
            canvas,
            primitive,
            set_paint: false,
            fill_rule: FillRule::default(),
        }
    }

    set_paint_fns!();

    /// Sets the fill rule.
    ///
    /// Only matters for path filling. Primitives
    /// are filled the same regardless of fill rule.
    pub fn fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Draws the fill.
    ///
    /// (Or rather, emits the command that causes the shape to be drawn
    /// when [`Canvas::render_to_layer`] is called.)
    pub fn draw(mut self) {
        if !self.set_paint {
            self = self.solid_color(Color::BLACK);
        }

        let cmd = match self.primitive {
            Some(primitive) => Command::FillPrimitive { primitive },
            None => Command::FillPath {
                fill_rule: self.fill_rule,
            },
        };
        self.canvas.cmd(cmd);
    }
}

/// Builder-like API to stroke a shape.
///
/// Allows configuring the following:
/// * the paint - defaults to solid black
/// * the stroke width - defaults to 1.0
/// * the line cap - defaults to Butt
/// * the line join - defaults to Miter
/// * stroke dashes - default to none (indicating a full solid stroke)
///
/// Call `draw()` to finish the draw operation.
#[must_use = "call Stroke::draw() to finish the builder"]
pub struct Stroke<'cv> {
    canvas: &'cv mut Canvas,
    primitive: Option<Primitive>,
    settings: StrokeSettings,
    set_paint: bool,
    set_dashes: bool,
}

impl<'cv> Stroke<'cv> {
    fn new(canvas: &'cv mut Canvas, primitive: Option<Primitive>) -> Self {
        Self {
            canvas,
            primitive,
            settings: StrokeSettings::default(),
            set_paint: false,
            set_dashes: false,
        }
    }

    set_paint_fns!();

    /// Sets the stroke width.
    pub fn width(mut self, stroke_width: f32) -> Self {
        self.settings.width = stroke_width;
        self
    }

    /// Sets the line cap.
    pub fn line_cap(mut self, line_cap: LineCap) -> Self {
        self.settings.line_cap = line_cap;
        self
    }

    /// Sets the line join.
    pub fn line_join(mut self, line_join: LineJoin) -> Self {
        self.settings.line_join = line_join;
        self
    }

    /// Dashes the stroke, alternating over
    /// the given list of dash pairs.
    pub fn dash(mut self, offset: f32, dashes: impl IntoIterator<Item = DashPair>) -> Self {
        self.canvas.cmd(Command::ClearDashPairs);
        for dash in dashes {
            self.canvas.cmd(Command::PushDashPair(dash));
        }
        self.set_dashes = true;
        self.settings.dash_offset = offset;
        self
    }

    /// Draws the stroke.
    ///
    /// (Or rather, emits the command that causes the shape to be drawn
    /// when [`Canvas::render_to_layer`] is called.)
    pub fn draw(mut self) {
        if !self.set_paint {
            self = self.solid_color(Color::BLACK);
        }

        let cmd = match self.primitive {
            Some(primitive) => Command::StrokePrimitive {
                stroke_settings: self.settings,
                primitive,
            },
            None => Command::StrokePath {
                stroke_settings: self.settings,
            },
        };
        self.canvas.cmd(cmd);

        // Clean up modified renderer state
        if self.set_dashes {
            self.canvas.cmd(Command::ClearDashPairs);
        }
    }
}

/// The state of the canvas.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct State {
    transform: Affine2,
    // TODO allow saving/restoring clips without overhead.
    // For now, save/restore doesn't work with nested clips.
    has_clip: bool,
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use crate::path::PathSegment;

    use super::*;

    #[test]
    fn fill_path() {
        let mut canvas = Canvas::new();

        let path = Path::builder()
            .move_to(vec2(500., 500.))
            .line_to(vec2(1000., 1000.))
            .build();

        canvas.fill_path(&path).draw();

        assert_eq!(
            canvas.take_commands(),
            vec![
                Command::ClearPath,
                Command::PushPathSegment(PathSegment::MoveTo(vec2(500., 500.))),
                Command::PushPathSegment(PathSegment::LineTo(vec2(1000., 1000.))),
                Command::UseSolidPaint(Color::BLACK),
                Command::FillPath {
                    fill_rule: FillRule::default()
                }
            ]
        );
    }

    #[test]
    fn stroke_primitive_with_dashes() {
        let mut canvas = Canvas::new();
        let circle = crate::Circle::new(vec2(0., 0.), 5.);

        canvas
            .stroke_primitive(circle)
            .width(2.)
            .dash(1., [DashPair::splat(4.)])
            .solid_color(Color::WHITE)
            .draw();

        assert_eq!(
            canvas.take_commands(),
            vec![
                Command::ClearDashPairs,
                Command::PushDashPair(DashPair::splat(4.)),
                Command::UseSolidPaint(Color::WHITE),
                Command::StrokePrimitive {
                    stroke_settings: StrokeSettings {
                        width: 2.,
                        dash_offset: 1.,
                        ..Default::default()
                    },
                    primitive: circle.into(),
                },
                Command::ClearDashPairs,
            ]
        );
    }

    #[test]
    fn blend_paint_emits_stops() {
        let mut canvas = Canvas::new();
        let blend = Blend::radial(vec2(0., 0.), 0., vec2(0., 0.), 10.)
            .stop(0., Color::WHITE)
            .stop(1., Color::BLACK);

        canvas
            .fill_primitive(crate::Circle::new(vec2(0., 0.), 10.))
            .blend(&blend)
            .draw();

        let commands = canvas.take_commands();
        assert_eq!(
            commands[0],
            Command::UseRadialGradientPaint {
                start: vec2(0., 0.),
                end: vec2(0., 0.),
                radius: 10.,
            }
        );
        assert!(matches!(commands[1], Command::PushGradientStop(_)));
        assert!(matches!(commands[2], Command::PushGradientStop(_)));
    }

    #[test]
    fn blend_without_enough_stops_degrades_to_solid() {
        let mut canvas = Canvas::new();

        canvas
            .fill_primitive(crate::Rectangle::new(vec2(0., 0.), vec2(8., 8.)))
            .blend(&Blend::linear(vec2(0., 0.), vec2(8., 0.)))
            .draw();
        canvas
            .fill_primitive(crate::Rectangle::new(vec2(0., 0.), vec2(8., 8.)))
            .blend(&Blend::linear(vec2(0., 0.), vec2(8., 0.)).stop(0., Color::RED))
            .draw();

        let commands = canvas.take_commands();
        assert_eq!(commands[0], Command::UseSolidPaint(Color::TRANSPARENT));
        assert_eq!(commands[2], Command::UseSolidPaint(Color::RED));
        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::UseLinearGradientPaint { .. })));
    }

    #[test]
    fn save_restore_round_trips_transform() {
        let mut canvas = Canvas::new();
        canvas.translate(vec2(10., 10.));
        let before = canvas.current_transform();

        canvas.save();
        canvas.rotate(1.).scale(vec2(2., 2.));
        canvas.restore();

        assert_eq!(canvas.current_transform(), before);
    }

    #[test]
    #[should_panic]
    fn unbalanced_restore_panics() {
        Canvas::new().restore();
    }

    #[test]
    fn draw_image_command() {
        let mut canvas = Canvas::new();
        let id = ImageId::default();
        canvas.draw_image(id, vec2(3., 4.));

        assert_eq!(
            canvas.take_commands(),
            vec![Command::DrawImage {
                image: id,
                position: vec2(3., 4.),
                scale: Vec2::ONE,
                opacity: 1.,
            }]
        );
    }
}
