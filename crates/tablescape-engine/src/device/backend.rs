use crate::resources::RawImage;
use crate::shader::UniformTable;

use super::BackendError;

/// Texture units available to the shading stage when a backend does not
/// report its own limit.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Opaque backend texture identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// Pixel layout of an uploaded texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFormat {
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    /// Maps a decoded channel count to a format. Only 3 and 4 are supported.
    #[inline]
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(TextureFormat::Rgb8),
            4 => Some(TextureFormat::Rgba8),
            _ => None,
        }
    }

    #[inline]
    pub fn channels(self) -> u8 {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// Drawable primitive meshes. Geometry itself is owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Torus,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::TaperedCylinder,
        PrimitiveKind::Torus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::TaperedCylinder => "tapered-cylinder",
            PrimitiveKind::Torus => "torus",
        }
    }
}

/// Graphics API seam used by the registry and the scene composer.
///
/// Implementations own texture memory and mesh geometry. Everything is
/// single-threaded and synchronous; no call may block on the GPU.
pub trait GraphicsBackend {
    /// Number of texture units the shading stage can sample from.
    fn max_texture_units(&self) -> usize {
        MAX_TEXTURE_UNITS
    }

    /// Uploads level 0 of a 2D texture.
    fn upload_texture_2d(&mut self, image: &RawImage) -> Result<TextureHandle, BackendError>;

    /// Fills the remaining mip levels of `texture` from level 0.
    fn generate_mipmaps(&mut self, texture: TextureHandle) -> Result<(), BackendError>;

    /// Makes `texture` visible on texture unit `slot`.
    fn bind_texture_unit(&mut self, slot: u32, texture: TextureHandle);

    /// Releases a texture. Unknown handles are ignored.
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Prepares geometry for `kind`. Called once per kind before drawing.
    fn load_mesh(&mut self, kind: PrimitiveKind);

    /// Draws one primitive using the currently resident uniform state.
    fn draw_primitive(&mut self, kind: PrimitiveKind, uniforms: &UniformTable);
}
