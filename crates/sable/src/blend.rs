use glam::Vec2;

use crate::Color;

/// A "stop" in a blend, consisting
/// of a position (0.0..=1.0) along the blend
/// and the color value at that position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    position: f32,
    color: Color,
}

impl GradientStop {
    pub fn new(position: f32, color: impl Into<Color>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// The geometry of a [`Blend`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlendGeometry {
    /// Colors interpolate along the line from `start` to `end`.
    Linear { start: Vec2, end: Vec2 },
    /// Colors interpolate between two circles.
    ///
    /// Software backends may approximate this with a single-radius
    /// radial gradient centered between `start_center` and `end_center`,
    /// ignoring `start_radius`.
    Radial {
        start_center: Vec2,
        start_radius: f32,
        end_center: Vec2,
        end_radius: f32,
    },
}

/// A gradient definition usable as a fill or stroke paint.
///
/// A blend is a [`BlendGeometry`] plus an ordered list of
/// [`GradientStop`]s. Stops should be added in increasing
/// position order; backends are not required to sort them.
/// A blend with fewer than two stops is drawn as a solid paint
/// (the single stop's color, or fully transparent with none).
#[derive(Clone, Debug, PartialEq)]
pub struct Blend {
    geometry: BlendGeometry,
    stops: Vec<GradientStop>,
}

impl Blend {
    /// Creates a linear blend from `start` to `end` with no stops.
    pub fn linear(start: Vec2, end: Vec2) -> Self {
        Self {
            geometry: BlendGeometry::Linear { start, end },
            stops: Vec::new(),
        }
    }

    /// Creates a radial blend between two circles with no stops.
    pub fn radial(
        start_center: Vec2,
        start_radius: f32,
        end_center: Vec2,
        end_radius: f32,
    ) -> Self {
        Self {
            geometry: BlendGeometry::Radial {
                start_center,
                start_radius,
                end_center,
                end_radius,
            },
            stops: Vec::new(),
        }
    }

    /// Appends a stop, returning `self` for chaining.
    pub fn stop(mut self, position: f32, color: impl Into<Color>) -> Self {
        self.stops.push(GradientStop::new(position, color));
        self
    }

    pub fn geometry(&self) -> BlendGeometry {
        self.geometry
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    #[test]
    fn stop_chaining() {
        let blend = Blend::linear(vec2(0., 0.), vec2(100., 0.))
            .stop(0., Color::BLACK)
            .stop(1., Color::WHITE);
        assert_eq!(blend.stops().len(), 2);
        assert_eq!(blend.stops()[1].color(), Color::WHITE);
        assert_eq!(blend.stops()[1].position(), 1.);
    }
}
