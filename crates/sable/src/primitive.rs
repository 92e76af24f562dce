use glam::Vec2;

use crate::{Path, PathSegment};

/// Control-point distance for approximating a quarter circle
/// with a cubic Bezier, as a fraction of the radius.
const ARC_KAPPA: f32 = 0.552_284_8;

/// A primitive shape.
///
/// Rendering backends may use SDFs or other specialized
/// techniques to render these shapes more precisely and efficiently
/// than they would had the shapes been approximated using Bezier paths.
///
/// # Transformations
/// Some transformations can be directly applied to `Primitive`s while maintaining their
/// primitive nature. These include:
/// * translation
/// * scaling, with a few notes:
///     * If the scale factor along the axes differ, then rounded rectangle radii are
///       scaled by the x-axis scale factor. The y-axis factor is ignored.
///     * If the scale factor along the axes differ, then a circle becomes an ellipse.
///
/// Rotation can be supported for 90-degree increments, but this is unimplemented.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    Rectangle(Rectangle),
    RoundedRectangle(RoundedRectangle),
    Circle(Circle),
    Ellipse(Ellipse),
}

impl Primitive {
    pub fn translated(&self, translation: Vec2) -> Self {
        match self {
            Primitive::Rectangle(rect) => Primitive::Rectangle(rect.translated(translation)),
            Primitive::RoundedRectangle(rounded_rect) => {
                Primitive::RoundedRectangle(rounded_rect.translated(translation))
            }
            Primitive::Circle(circle) => Primitive::Circle(circle.translated(translation)),
            Primitive::Ellipse(ellipse) => Primitive::Ellipse(ellipse.translated(translation)),
        }
    }

    pub fn scaled(&self, scale: Vec2) -> Self {
        match self {
            Primitive::Rectangle(rect) => Primitive::Rectangle(rect.scaled(scale)),
            Primitive::RoundedRectangle(rounded_rect) => {
                Primitive::RoundedRectangle(rounded_rect.scaled(scale))
            }
            Primitive::Circle(circle) => circle.scaled(scale),
            Primitive::Ellipse(ellipse) => Primitive::Ellipse(ellipse.scaled(scale)),
        }
    }

    /// The smallest rectangle containing the primitive.
    pub fn bounding_box(&self) -> Rectangle {
        match self {
            Primitive::Rectangle(rect) => *rect,
            Primitive::RoundedRectangle(rounded_rect) => rounded_rect.rectangle(),
            Primitive::Circle(circle) => circle.bounding_box(),
            Primitive::Ellipse(ellipse) => ellipse.rectangle(),
        }
    }

    /// Approximates the primitive with a Bezier path.
    ///
    /// Useful when a shape produced by the primitive constructors
    /// needs path-level operations (flattening, clipping by path,
    /// polygon conversion).
    pub fn to_path(&self) -> Path {
        match self {
            Primitive::Rectangle(rect) => rect.to_path(),
            Primitive::RoundedRectangle(rounded_rect) => rounded_rect.to_path(),
            Primitive::Circle(circle) => circle.to_path(),
            Primitive::Ellipse(ellipse) => ellipse.to_path(),
        }
    }
}

/// A rectangle, defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    position: Vec2,
    size: Vec2,
}

impl Rectangle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Creates a rectangle spanning two opposite corners.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self::new(min, max - min)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.position).all() && point.cmple(self.max()).all()
    }

    pub fn translated(&self, translation: Vec2) -> Self {
        Self {
            position: self.position + translation,
            ..*self
        }
    }

    pub fn scaled(&self, scale: Vec2) -> Self {
        Self {
            size: self.size * scale,
            ..*self
        }
    }

    pub fn to_path(&self) -> Path {
        let max = self.max();
        Path::builder()
            .move_to(self.position)
            .line_to(Vec2::new(max.x, self.position.y))
            .line_to(max)
            .line_to(Vec2::new(self.position.x, max.y))
            .close()
    }
}

/// A rectangle with rounded corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedRectangle {
    rectangle: Rectangle,
    border_radii: BorderRadii,
}

impl RoundedRectangle {
    pub fn new(rectangle: Rectangle, border_radii: BorderRadii) -> Self {
        Self {
            rectangle,
            border_radii,
        }
    }

    pub fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    pub fn border_radii(&self) -> BorderRadii {
        self.border_radii
    }

    pub fn translated(&self, translation: Vec2) -> Self {
        Self {
            rectangle: self.rectangle.translated(translation),
            ..*self
        }
    }

    pub fn scaled(&self, scale: Vec2) -> Self {
        Self {
            rectangle: self.rectangle.scaled(scale),
            border_radii: self.border_radii.scaled(scale),
        }
    }

    /// Approximates the rounded rectangle with a path, one cubic
    /// arc per corner. Radii are clamped to half the rectangle's
    /// smaller dimension.
    pub fn to_path(&self) -> Path {
        let min = self.rectangle.position();
        let max = self.rectangle.max();
        let limit = self.rectangle.size().min_element() / 2.;
        let radius = |r: f32| r.clamp(0., limit);

        let tl = radius(self.border_radii.top_left());
        let tr = radius(self.border_radii.top_right());
        let br = radius(self.border_radii.bottom_right());
        let bl = radius(self.border_radii.bottom_left());

        let corner = |builder: crate::PathBuilder, from: Vec2, via: Vec2, to: Vec2| {
            builder.cubic_to(from.lerp(via, ARC_KAPPA), to.lerp(via, ARC_KAPPA), to)
        };

        let mut builder = Path::builder().move_to(Vec2::new(min.x + tl, min.y));
        builder = builder.line_to(Vec2::new(max.x - tr, min.y));
        builder = corner(
            builder,
            Vec2::new(max.x - tr, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, min.y + tr),
        );
        builder = builder.line_to(Vec2::new(max.x, max.y - br));
        builder = corner(
            builder,
            Vec2::new(max.x, max.y - br),
            Vec2::new(max.x, max.y),
            Vec2::new(max.x - br, max.y),
        );
        builder = builder.line_to(Vec2::new(min.x + bl, max.y));
        builder = corner(
            builder,
            Vec2::new(min.x + bl, max.y),
            Vec2::new(min.x, max.y),
            Vec2::new(min.x, max.y - bl),
        );
        builder = builder.line_to(Vec2::new(min.x, min.y + tl));
        builder = corner(
            builder,
            Vec2::new(min.x, min.y + tl),
            Vec2::new(min.x, min.y),
            Vec2::new(min.x + tl, min.y),
        );
        builder.close()
    }
}

/// The rounding radius applied to each corner of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderRadii {
    top_left: f32,
    top_right: f32,
    bottom_left: f32,
    bottom_right: f32,
}

impl BorderRadii {
    /// All corners have the same border radius.
    pub fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Explicitly set each corner's radius.
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn top_left(&self) -> f32 {
        self.top_left
    }

    pub fn top_right(&self) -> f32 {
        self.top_right
    }

    pub fn bottom_left(&self) -> f32 {
        self.bottom_left
    }

    pub fn bottom_right(&self) -> f32 {
        self.bottom_right
    }

    pub fn scaled(&self, scale: Vec2) -> Self {
        // If the two scales differ, we just pick the x-axis for now.
        let scale = scale.x;
        Self {
            top_left: self.top_left * scale,
            top_right: self.top_right * scale,
            bottom_right: self.bottom_right * scale,
            bottom_left: self.bottom_left * scale,
        }
    }
}

/// A circle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            self.center - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.),
        )
    }

    pub fn translated(&self, translation: Vec2) -> Self {
        Self {
            center: self.center + translation,
            ..*self
        }
    }

    /// Scales the circle. If the scales along the axes
    /// differ, then the circle becomes an ellipse.
    pub fn scaled(&self, scale: Vec2) -> Primitive {
        if scale.x == scale.y {
            Primitive::Circle(Self {
                radius: self.radius * scale.x,
                ..*self
            })
        } else {
            Primitive::Ellipse(Ellipse::from_circle(*self).scaled(scale))
        }
    }

    pub fn to_path(&self) -> Path {
        Ellipse::from_circle(*self).to_path()
    }
}

/// An ellipse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse(Rectangle);

impl Ellipse {
    /// Creates an ellipse from its bounding rectangle.
    pub fn from_rectangle(rect: Rectangle) -> Self {
        Self(rect)
    }

    /// Creates an ellipse from a circle.
    pub fn from_circle(circle: Circle) -> Self {
        Self::from_rectangle(circle.bounding_box())
    }

    pub fn rectangle(&self) -> Rectangle {
        self.0
    }

    pub fn translated(self, translation: Vec2) -> Self {
        Self(self.0.translated(translation))
    }

    pub fn scaled(self, scale: Vec2) -> Self {
        Self(self.0.scaled(scale))
    }

    /// Approximates the ellipse with four cubic arcs.
    pub fn to_path(&self) -> Path {
        let center = self.0.center();
        let radii = self.0.size() / 2.;
        let handles = radii * ARC_KAPPA;

        let east = center + Vec2::new(radii.x, 0.);
        let south = center + Vec2::new(0., radii.y);
        let west = center - Vec2::new(radii.x, 0.);
        let north = center - Vec2::new(0., radii.y);

        let mut segments = vec![PathSegment::MoveTo(east)];
        let quarter = |from: Vec2, from_tangent: Vec2, to: Vec2, to_tangent: Vec2| {
            PathSegment::CubicTo {
                control1: from + from_tangent,
                control2: to - to_tangent,
                end: to,
            }
        };
        segments.push(quarter(
            east,
            Vec2::new(0., handles.y),
            south,
            Vec2::new(-handles.x, 0.),
        ));
        segments.push(quarter(
            south,
            Vec2::new(-handles.x, 0.),
            west,
            Vec2::new(0., -handles.y),
        ));
        segments.push(quarter(
            west,
            Vec2::new(0., -handles.y),
            north,
            Vec2::new(handles.x, 0.),
        ));
        segments.push(quarter(
            north,
            Vec2::new(handles.x, 0.),
            east,
            Vec2::new(0., handles.y),
        ));
        segments.push(PathSegment::Close);
        Path::from_segments(segments)
    }
}

impl From<Rectangle> for Primitive {
    fn from(r: Rectangle) -> Self {
        Primitive::Rectangle(r)
    }
}

impl From<RoundedRectangle> for Primitive {
    fn from(r: RoundedRectangle) -> Self {
        Primitive::RoundedRectangle(r)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Ellipse> for Primitive {
    fn from(e: Ellipse) -> Self {
        Primitive::Ellipse(e)
    }
}
