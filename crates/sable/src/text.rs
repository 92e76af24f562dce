//! Text drawing by converting glyph outlines to paths.
//!
//! Glyphs are placed left to right using their horizontal advances.
//! There is no shaping, kerning or bidi handling here: that belongs
//! to a rendering engine plugged in at the [`Backend`](crate::Backend)
//! seam. This module covers the convenience case of labeling a drawing.

use glam::{vec2, Vec2};
use owned_ttf_parser::{Face, OutlineBuilder};

use crate::{
    path::{Path, PathSegment},
    text::font::Fonts,
    FontId,
};

pub(crate) mod font;

/// How to render a run of text.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontId,
    /// Font size in canvas units (the em height).
    pub size: f32,
}

impl TextStyle {
    pub fn new(font: FontId, size: f32) -> Self {
        Self { font, size }
    }
}

/// Converts a run of text into a single path, with the first
/// glyph's origin (on the baseline) at `origin`.
///
/// Characters without a glyph in the font are skipped.
pub(crate) fn to_path(fonts: &Fonts, style: &TextStyle, origin: Vec2, text: &str) -> Path {
    let face = fonts.get(style.font);
    let scale = style.size / face.units_per_em() as f32;

    let mut segments = Vec::new();
    let mut pen_x = origin.x;
    for ch in text.chars() {
        let glyph = match face.glyph_index(ch) {
            Some(glyph) => glyph,
            None => continue,
        };

        let mut outliner = Outliner {
            segments: &mut segments,
            scale,
            offset: vec2(pen_x, origin.y),
        };
        face.outline_glyph(glyph, &mut outliner);
        pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    }
    Path::from_segments(segments)
}

/// Collects a glyph outline into path segments, mapping from
/// the font's y-up unit space into canvas space.
struct Outliner<'a> {
    segments: &'a mut Vec<PathSegment>,
    scale: f32,
    offset: Vec2,
}

impl Outliner<'_> {
    fn map(&self, x: f32, y: f32) -> Vec2 {
        self.offset + vec2(x * self.scale, -y * self.scale)
    }
}

impl OutlineBuilder for Outliner<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::MoveTo(self.map(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::LineTo(self.map(x, y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::QuadTo {
            control: self.map(x1, y1),
            end: self.map(x, y),
        });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::CubicTo {
            control1: self.map(x1, y1),
            control2: self.map(x2, y2),
            end: self.map(x, y),
        });
    }

    fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outliner_flips_y() {
        let mut segments = Vec::new();
        let mut outliner = Outliner {
            segments: &mut segments,
            scale: 0.5,
            offset: vec2(10., 20.),
        };
        outliner.move_to(2., 4.);
        outliner.close();

        assert_eq!(
            segments,
            vec![PathSegment::MoveTo(vec2(11., 18.)), PathSegment::Close]
        );
    }

    #[test]
    fn malformed_font_rejected() {
        let mut fonts = Fonts::default();
        assert!(fonts.add(vec![0, 1, 2, 3]).is_err());
    }
}
