use std::{fmt::Display, str::FromStr};

#[cfg(feature = "color-to-linear")]
use fast_srgb8::{f32x4_to_srgb8, srgb8_to_f32};
#[cfg(feature = "color-to-linear")]
use glam::{vec4, Vec4};

/// An sRGB color with an alpha channel.
///
/// Unpremultiplied by convention.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color([u8; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(u8::MAX, u8::MAX, u8::MAX);
    pub const RED: Color = Color::rgb(u8::MAX, 0, 0);
    pub const GREEN: Color = Color::rgb(0, u8::MAX, 0);
    pub const BLUE: Color = Color::rgb(0, 0, u8::MAX);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates a color from its RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Creates a color from RGB components with 100% alpha.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    /// Creates a color from hue, saturation and value.
    ///
    /// `hue` is in degrees and wraps around; `saturation` and `value`
    /// are clamped to `[0, 1]`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hue = hue.rem_euclid(360.);
        let saturation = saturation.clamp(0., 1.);
        let value = value.clamp(0., 1.);

        let chroma = value * saturation;
        let x = chroma * (1. - ((hue / 60.) % 2. - 1.).abs());
        let (r, g, b) = match hue {
            h if h < 60. => (chroma, x, 0.),
            h if h < 120. => (x, chroma, 0.),
            h if h < 180. => (0., chroma, x),
            h if h < 240. => (0., x, chroma),
            h if h < 300. => (x, 0., chroma),
            _ => (chroma, 0., x),
        };
        let m = value - chroma;
        let to_u8 = |channel: f32| ((channel + m) * u8::MAX as f32).round() as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Gets the red component.
    pub fn red(&self) -> u8 {
        self.0[0]
    }

    /// Gets the green component.
    pub fn green(&self) -> u8 {
        self.0[1]
    }

    /// Gets the blue component.
    pub fn blue(&self) -> u8 {
        self.0[2]
    }

    /// Gets the alpha component.
    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// Returns the same color with a different alpha component.
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.0[3] = alpha;
        self
    }

    /// Gets the color as an array of values in RGBA order.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }

    /// Creates a color from an array of values in RGBA order.
    pub fn from_array(array: [u8; 4]) -> Self {
        Self(array)
    }

    /// Encodes the color to linear RGB.
    ///
    /// Components are in the range `[0, 1]`.
    ///
    /// Linear RGB is appropriate for blending or otherwise
    /// operating on the color value.
    #[cfg(feature = "color-to-linear")]
    pub fn to_linear(&self) -> Vec4 {
        vec4(
            srgb8_to_f32(self.red()),
            srgb8_to_f32(self.green()),
            srgb8_to_f32(self.blue()),
            srgb8_to_f32(self.alpha()),
        )
    }

    /// Creates a color from linear RGB.
    ///
    /// The given components should lie within the range `[0, 1]`.
    #[cfg(feature = "color-to-linear")]
    pub fn from_linear(linear: Vec4) -> Self {
        let mut this = Self(f32x4_to_srgb8(linear.to_array()));
        this.0[3] = (linear.w * u8::MAX as f32).round() as u8;
        this
    }
}

impl From<[u8; 4]> for Color {
    fn from(array: [u8; 4]) -> Self {
        Self::from_array(array)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rgba = self.to_array();
        write!(f, "#{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2])?;
        if rgba[3] != u8::MAX {
            write!(f, "{:02x}", rgba[3])?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to parse '{0}' as a hex color")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses a hex color with an optional leading `#`.
    ///
    /// Accepts 3, 4, 6 and 8 digit forms; short forms
    /// duplicate each digit, so `#1fa` equals `#11ffaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseColorError(s.to_owned());
        let digits = s.strip_prefix('#').unwrap_or(s);
        // Byte-indexed slicing below requires single-byte characters.
        if !digits.is_ascii() {
            return Err(error());
        }

        let component = |index: usize| -> Result<u8, ParseColorError> {
            match digits.len() {
                3 | 4 => {
                    let nibble = u8::from_str_radix(&digits[index..index + 1], 16)
                        .map_err(|_| error())?;
                    Ok(nibble << 4 | nibble)
                }
                6 | 8 => u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
                    .map_err(|_| error()),
                _ => Err(error()),
            }
        };

        let has_alpha = matches!(digits.len(), 4 | 8);
        Ok(Self::rgba(
            component(0)?,
            component(1)?,
            component(2)?,
            if has_alpha { component(3)? } else { u8::MAX },
        ))
    }
}
