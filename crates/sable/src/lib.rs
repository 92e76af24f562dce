//! Procedural 2D vector drawing.
//!
//! `sable` is a convenience layer for drawing shapes, paths, gradients,
//! images and text. A [`Canvas`] records drawing operations into a flat
//! command stream; rasterization is delegated to a pluggable [`Backend`]
//! (see the `sable-tiny-skia` crate for a software implementation).
//!
//! Beyond drawing, the crate bundles the small geometry toolbox that
//! procedural drawing tends to need: polygon offsetting and smoothing,
//! circle intersections, through-point spline fitting, and path-to-polygon
//! flattening. These helpers are best-effort by design; see the
//! [`geometry`] and [`Polygon`] docs for their limits.

mod backend;
mod blend;
mod canvas;
mod color;
mod context;
pub mod geometry;
mod image;
mod layer;
mod path;
mod polygon;
mod primitive;
pub mod shapes;
#[cfg(feature = "text")]
pub mod text;
mod types;

pub use backend::{
    command::{Command, CommandStream},
    Backend, BackendLayer, ErasedBackend,
};
pub use blend::{Blend, BlendGeometry, GradientStop};
pub use canvas::{Canvas, Fill, Stroke};
pub use color::{Color, ParseColorError};
pub use context::Context;
pub use image::{Image, ImageId, Images};
#[cfg(any(feature = "png", feature = "jpeg"))]
pub use image::InvalidImage;
pub use layer::Layer;
pub use path::{Path, PathBuilder, PathSegment};
pub use polygon::{fit, Polygon};
pub use primitive::{BorderRadii, Circle, Ellipse, Primitive, Rectangle, RoundedRectangle};
#[cfg(feature = "text")]
pub use text::{
    font::{FontId, MalformedFont},
    TextStyle,
};
pub use types::{DashPair, FillRule, LineCap, LineJoin, StrokeSettings};

pub use glam::Vec2;

pub extern crate glam;
