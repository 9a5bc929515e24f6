use std::path::Path;

use crate::device::{GraphicsBackend, TextureHandle};

use super::{decode_image, LoadError, RawImage};

/// A registered texture.
///
/// `slot` is the registration index and doubles as the texture unit the
/// texture is bound to. Slots are never reassigned within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub slot: u32,
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Append-only map from tags to texture slots.
///
/// Lookup is a linear scan returning the first match, so a duplicate tag
/// registered later still takes a slot but is never found.
#[derive(Debug)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    flip_vertically: bool,
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            flip_vertically: true,
        }
    }
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls whether decoded images are flipped to bottom-up row order.
    pub fn with_vertical_flip(mut self, flip: bool) -> Self {
        self.flip_vertically = flip;
        self
    }

    #[inline]
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes `path` and registers it under `tag`. Returns the allocated slot.
    ///
    /// On failure nothing is registered and no slot is consumed.
    pub fn register<B>(&mut self, backend: &mut B, path: impl AsRef<Path>, tag: impl Into<String>) -> Result<u32, LoadError>
    where
        B: GraphicsBackend + ?Sized,
    {
        let path = path.as_ref();
        let tag = tag.into();
        self.ensure_capacity(backend, &tag)?;

        let image = match decode_image(path, self.flip_vertically) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("{err}");
                return Err(err);
            }
        };
        log::info!(
            "loaded image {}: width {}, height {}, channels {}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );

        self.register_image(backend, &image, tag)
    }

    /// Registers already-decoded pixels under `tag`. Returns the allocated slot.
    pub fn register_image<B>(&mut self, backend: &mut B, image: &RawImage, tag: impl Into<String>) -> Result<u32, LoadError>
    where
        B: GraphicsBackend + ?Sized,
    {
        let tag = tag.into();
        self.ensure_capacity(backend, &tag)?;

        if image.format().is_none() {
            let err = LoadError::UnsupportedChannels {
                image: format!("texture \"{tag}\""),
                channels: image.channels,
            };
            log::warn!("{err}");
            return Err(err);
        }

        let handle = backend.upload_texture_2d(image)?;
        if let Err(err) = backend.generate_mipmaps(handle) {
            backend.delete_texture(handle);
            return Err(err.into());
        }

        let slot = self.entries.len() as u32;
        if self.find_slot(&tag).is_some() {
            log::warn!("texture tag \"{tag}\" registered twice; slot {slot} is unreachable");
        }
        self.entries.push(TextureEntry {
            tag,
            slot,
            handle,
            width: image.width,
            height: image.height,
        });
        Ok(slot)
    }

    /// Binds every registered texture to the unit matching its slot.
    ///
    /// Call once after all registrations and before any textured draw.
    pub fn bind_all<B: GraphicsBackend + ?Sized>(&self, backend: &mut B) {
        for entry in &self.entries {
            backend.bind_texture_unit(entry.slot, entry.handle);
        }
        log::debug!("bound {} textures", self.entries.len());
    }

    /// Slot of the first texture registered under `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.slot)
    }

    /// Backend handle of the first texture registered under `tag`.
    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.handle)
    }

    /// Releases every texture and empties the registry.
    pub fn destroy_all<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) {
        for entry in self.entries.drain(..) {
            backend.delete_texture(entry.handle);
        }
    }

    fn ensure_capacity<B: GraphicsBackend + ?Sized>(&self, backend: &B, tag: &str) -> Result<(), LoadError> {
        let max = backend.max_texture_units();
        if self.entries.len() >= max {
            let err = LoadError::SlotsExhausted { tag: tag.to_owned(), max };
            log::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BackendCall, RecordingBackend};

    fn rgb() -> RawImage {
        RawImage::new(vec![128; 2 * 2 * 3], 2, 2, 3)
    }

    fn rgba() -> RawImage {
        RawImage::new(vec![255; 4], 1, 1, 4)
    }

    // ── slot allocation ───────────────────────────────────────────────────

    #[test]
    fn slots_follow_registration_order() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();

        let tags = ["floor", "leg", "tabletop", "plate", "mug"];
        for (i, tag) in tags.iter().enumerate() {
            let img = if i % 2 == 0 { rgb() } else { rgba() };
            assert_eq!(registry.register_image(&mut backend, &img, *tag).unwrap(), i as u32);
        }

        for (i, tag) in tags.iter().enumerate() {
            assert_eq!(registry.find_slot(tag), Some(i as u32));
        }
    }

    #[test]
    fn upload_is_followed_by_mipmaps() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "floor").unwrap();

        let handle = registry.find_handle("floor").unwrap();
        assert!(matches!(backend.calls()[0], BackendCall::Upload { texture, .. } if texture == handle));
        assert_eq!(backend.calls()[1], BackendCall::GenerateMipmaps(handle));
    }

    #[test]
    fn unsupported_channels_register_nothing() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "floor").unwrap();

        for channels in [1u8, 2] {
            let img = RawImage::new(vec![0; channels as usize], 1, 1, channels);
            let err = registry.register_image(&mut backend, &img, "mask").unwrap_err();
            assert!(matches!(err, LoadError::UnsupportedChannels { channels: c, .. } if c == channels));
            assert_eq!(
                err.to_string(),
                format!("texture \"mask\" has {channels} channels; only 3 or 4 are supported")
            );
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(backend.live_textures(), 1);
        assert_eq!(registry.find_slot("mask"), None);
    }

    #[test]
    fn failed_file_does_not_consume_slot() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();

        assert!(registry.register(&mut backend, "missing/Floor.jpg", "floor").is_err());
        assert_eq!(registry.register_image(&mut backend, &rgb(), "leg").unwrap(), 0);
    }

    #[test]
    fn register_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Mug.png");
        image::RgbaImage::new(4, 2).save(&path).unwrap();

        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.register(&mut backend, &path, "mug").unwrap(), 0);

        let entry = &registry.entries()[0];
        assert_eq!((entry.width, entry.height), (4, 2));
    }

    #[test]
    fn slot_limit_is_enforced() {
        let mut backend = RecordingBackend::with_texture_units(2);
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "a").unwrap();
        registry.register_image(&mut backend, &rgb(), "b").unwrap();

        let err = registry.register_image(&mut backend, &rgb(), "c").unwrap_err();
        assert!(matches!(err, LoadError::SlotsExhausted { max: 2, .. }));
        assert_eq!(registry.len(), 2);
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn duplicate_tag_first_registration_wins() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "wood").unwrap();
        assert_eq!(registry.register_image(&mut backend, &rgba(), "wood").unwrap(), 1);

        assert_eq!(registry.find_slot("wood"), Some(0));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_tag_is_none() {
        let registry = TextureRegistry::new();
        assert_eq!(registry.find_slot("floor"), None);
        assert_eq!(registry.find_handle("floor"), None);
    }

    // ── binding / teardown ────────────────────────────────────────────────

    #[test]
    fn bind_all_uses_slot_as_unit() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "floor").unwrap();
        registry.register_image(&mut backend, &rgb(), "leg").unwrap();
        registry.bind_all(&mut backend);

        assert_eq!(backend.bound_unit(0), registry.find_handle("floor"));
        assert_eq!(backend.bound_unit(1), registry.find_handle("leg"));
    }

    #[test]
    fn destroy_all_releases_textures() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut backend, &rgb(), "floor").unwrap();
        registry.register_image(&mut backend, &rgb(), "leg").unwrap();

        registry.destroy_all(&mut backend);
        assert!(registry.is_empty());
        assert_eq!(backend.live_textures(), 0);
    }
}
