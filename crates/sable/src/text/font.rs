use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};

#[derive(Debug, thiserror::Error)]
#[error("failed to parse font as TTF/OTF font data")]
pub struct MalformedFont;

// No Default: a valid id only comes out of `Fonts::add`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub(crate) usize);

/// The fonts available to a [`Context`](crate::Context).
#[derive(Default)]
pub(crate) struct Fonts {
    fonts: Vec<OwnedFace>,
}

impl Fonts {
    pub fn add(&mut self, data: Vec<u8>) -> Result<FontId, MalformedFont> {
        let face = OwnedFace::from_vec(data, 0).map_err(|_| MalformedFont)?;
        let id = FontId(self.fonts.len());
        log::info!(
            "Loaded font #{} ({} glyphs)",
            id.0,
            face.as_face_ref().number_of_glyphs()
        );
        self.fonts.push(face);
        Ok(id)
    }

    /// # Panics
    /// Panics if `id` did not come from this font store.
    pub fn get(&self, id: FontId) -> &Face {
        self.fonts[id.0].as_face_ref()
    }
}
