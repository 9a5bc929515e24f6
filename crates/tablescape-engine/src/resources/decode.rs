use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::device::TextureFormat;

use super::LoadError;

/// Decoded 8-bit pixels, tightly packed, rows bottom-up when flipped on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl RawImage {
    #[inline]
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self { pixels, width, height, channels }
    }

    /// Upload format for this image, `None` unless 3- or 4-channel.
    #[inline]
    pub fn format(&self) -> Option<TextureFormat> {
        TextureFormat::from_channels(self.channels)
    }

    /// Expands to RGBA8. `None` if the format is unsupported or the pixel
    /// buffer does not match the dimensions.
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        match self.format()? {
            TextureFormat::Rgba8 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            TextureFormat::Rgb8 => {
                let rgb = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())?;
                Some(DynamicImage::ImageRgb8(rgb).to_rgba8())
            }
        }
    }
}

/// Decodes an image file into 8-bit pixels with its native channel count.
///
/// Fails with [`LoadError::DecodeFailed`] if the file cannot be read or parsed
/// and with [`LoadError::UnsupportedChannels`] unless it has 3 or 4 channels.
/// Higher bit depths are narrowed to 8 bits.
pub fn decode_image(path: impl AsRef<Path>, flip_vertically: bool) -> Result<RawImage, LoadError> {
    let path = path.as_ref();
    let mut img = image::open(path).map_err(|source| LoadError::DecodeFailed {
        path: path.to_path_buf(),
        source,
    })?;

    if flip_vertically {
        img = img.flipv();
    }

    let (width, height) = (img.width(), img.height());
    let channels = img.color().channel_count();
    let pixels = match channels {
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        _ => {
            return Err(LoadError::UnsupportedChannels {
                image: format!("image {}", path.display()),
                channels,
            });
        }
    };

    Ok(RawImage { pixels, width, height, channels })
}
