//! Surface appearance of a draw.
//!
//! A draw is either flat-colored or textured, never both; the shading stage
//! selects between them with the `bUseTexture` flag.

use crate::coords::ColorRgba;

/// Paint source for a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(ColorRgba),
    /// Texture referenced by registry tag; resolved to a slot at bind time.
    Texture(String),
}

impl Paint {
    #[inline]
    pub fn solid(color: ColorRgba) -> Self {
        Paint::Solid(color)
    }

    #[inline]
    pub fn texture(tag: impl Into<String>) -> Self {
        Paint::Texture(tag.into())
    }
}
