use glam::{uvec2, UVec2, Vec2};

use crate::{backend::BackendLayer, Color, Context};

/// A layer of pixels to render to.
///
/// Sizes come in two flavors: _physical_ pixels, which is what the
/// backend allocates, and _logical_ units, which is what drawing
/// coordinates are expressed in. The two differ by the hidpi factor.
pub struct Layer {
    inner: Box<dyn BackendLayer>,
    physical_size: UVec2,
    hidpi_factor: f32,
}

impl Layer {
    pub(crate) fn new(
        context: &Context,
        physical_width: u32,
        physical_height: u32,
        hidpi_factor: f32,
    ) -> Self {
        Self {
            inner: context
                .backend()
                .create_layer(physical_width, physical_height, hidpi_factor),
            physical_size: uvec2(physical_width, physical_height),
            hidpi_factor,
        }
    }

    pub fn physical_width(&self) -> u32 {
        self.physical_size.x
    }

    pub fn physical_height(&self) -> u32 {
        self.physical_size.y
    }

    pub fn physical_size(&self) -> UVec2 {
        self.physical_size
    }

    pub fn logical_size(&self) -> Vec2 {
        self.physical_size.as_vec2() / self.hidpi_factor
    }

    pub fn logical_width(&self) -> f32 {
        self.logical_size().x
    }

    pub fn logical_height(&self) -> f32 {
        self.logical_size().y
    }

    pub fn hidpi_factor(&self) -> f32 {
        self.hidpi_factor
    }

    /// The rendered pixels, packed as `0xAARRGGBB`, row-major.
    pub fn to_argb(&self) -> Vec<u32> {
        self.inner.to_argb()
    }

    /// Fills the entire layer with a color, replacing previous content.
    pub fn fill(&mut self, color: Color) {
        self.inner.fill(color);
    }

    pub fn inner(&self) -> &dyn BackendLayer {
        &*self.inner
    }

    pub fn inner_mut(&mut self) -> &mut dyn BackendLayer {
        &mut *self.inner
    }
}
