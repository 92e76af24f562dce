use glam::{uvec2, UVec2};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// ID of an image registered with a [`Context`](crate::Context).
    pub struct ImageId;
}

/// An error returned when image data fails to decode.
#[cfg(any(feature = "png", feature = "jpeg"))]
#[derive(Debug, thiserror::Error)]
#[error("failed to decode image data: {0}")]
pub struct InvalidImage(#[from] ::image::ImageError);

/// A decoded RGBA8 image.
///
/// Unpremultiplied, in sRGB, row-major with no padding.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Creates an image from raw RGBA8 data.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "image data length does not match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Decodes an image from an encoded byte stream (PNG or JPEG,
    /// depending on the enabled features).
    #[cfg(any(feature = "png", feature = "jpeg"))]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidImage> {
        let decoded = ::image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba8(width, height, decoded.into_raw()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        uvec2(self.width, self.height)
    }

    /// The raw RGBA8 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The images registered with a [`Context`](crate::Context).
///
/// Passed to the backend on each render call so `DrawImage`
/// commands can be resolved. Images are immutable once added.
#[derive(Default)]
pub struct Images {
    images: SlotMap<ImageId, Image>,
}

impl Images {
    pub(crate) fn add(&mut self, image: Image) -> ImageId {
        log::info!("Loaded {}x{} image", image.width(), image.height());
        self.images.insert(image)
    }

    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_image_round_trip() {
        let image = Image::from_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(image.size(), uvec2(2, 1));
        assert_eq!(&image.data()[4..], &[5, 6, 7, 8]);
    }

    #[test]
    #[should_panic]
    fn mismatched_length_panics() {
        Image::from_rgba8(2, 2, vec![0; 4]);
    }
}
