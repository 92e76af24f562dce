use crate::{
    backend::command::CommandStream,
    image::{Image, ImageId, Images},
    Backend, ErasedBackend, Layer,
};

#[cfg(any(feature = "png", feature = "jpeg"))]
use crate::image::InvalidImage;
#[cfg(feature = "text")]
use crate::text::font::{FontId, Fonts, MalformedFont};

/// A `sable` rendering context.
///
/// Wraps a backend implementation and owns the resources
/// shared between canvases: images and fonts.
pub struct Context {
    backend: Box<dyn ErasedBackend>,
    images: Images,
    #[cfg(feature = "text")]
    fonts: Fonts,
}

impl Context {
    pub fn new(backend: impl Backend) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn ErasedBackend>) -> Self {
        Self {
            backend,
            images: Images::default(),
            #[cfg(feature = "text")]
            fonts: Fonts::default(),
        }
    }

    /// Creates a layer of `physical_width x physical_height` pixels.
    ///
    /// Drawing coordinates are logical: physical pixels divided
    /// by `hidpi_factor`.
    pub fn create_layer(&self, physical_width: u32, physical_height: u32, hidpi_factor: f32) -> Layer {
        Layer::new(self, physical_width, physical_height, hidpi_factor)
    }

    /// Registers an already-decoded image, returning its ID.
    pub fn add_image(&mut self, image: Image) -> ImageId {
        self.images.add(image)
    }

    /// Decodes and registers an encoded image (PNG or JPEG,
    /// depending on the enabled features).
    #[cfg(any(feature = "png", feature = "jpeg"))]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<ImageId, InvalidImage> {
        Ok(self.add_image(Image::from_bytes(bytes)?))
    }

    pub fn images(&self) -> &Images {
        &self.images
    }

    /// Registers a TTF/OTF font from its raw data.
    #[cfg(feature = "text")]
    pub fn add_font(&mut self, data: Vec<u8>) -> Result<FontId, MalformedFont> {
        self.fonts.add(data)
    }

    #[cfg(feature = "text")]
    pub(crate) fn fonts(&self) -> &Fonts {
        &self.fonts
    }

    pub(crate) fn render_to_layer(&mut self, layer: &mut Layer, commands: CommandStream) {
        self.backend
            .render_to_layer(layer.inner_mut(), commands, &self.images);
    }

    pub fn backend(&self) -> &dyn ErasedBackend {
        &*self.backend
    }

    pub fn backend_mut(&mut self) -> &mut dyn ErasedBackend {
        &mut *self.backend
    }
}
