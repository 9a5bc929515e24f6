use std::collections::BTreeMap;

use crate::resources::RawImage;
use crate::shader::UniformTable;

use super::{BackendError, GraphicsBackend, PrimitiveKind, TextureFormat, TextureHandle, MAX_TEXTURE_UNITS};

/// A backend call, in the order it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Upload { texture: TextureHandle, width: u32, height: u32, format: TextureFormat },
    GenerateMipmaps(TextureHandle),
    BindUnit { slot: u32, texture: TextureHandle },
    Delete(TextureHandle),
    LoadMesh(PrimitiveKind),
    Draw(PrimitiveKind),
}

/// A draw together with the uniform state it sampled.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    pub kind: PrimitiveKind,
    pub uniforms: UniformTable,
}

/// In-memory backend that records calls instead of touching a GPU.
///
/// Used by the studio in headless mode and throughout the tests.
#[derive(Debug)]
pub struct RecordingBackend {
    max_units: usize,
    next_handle: u64,
    live: BTreeMap<TextureHandle, TextureFormat>,
    units: Vec<Option<TextureHandle>>,
    calls: Vec<BackendCall>,
    draws: Vec<RecordedDraw>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::with_texture_units(MAX_TEXTURE_UNITS)
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that reports `units` texture units.
    pub fn with_texture_units(units: usize) -> Self {
        Self {
            max_units: units,
            next_handle: 1,
            live: BTreeMap::new(),
            units: vec![None; units],
            calls: Vec::new(),
            draws: Vec::new(),
        }
    }

    #[inline]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    #[inline]
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Texture currently bound on `slot`.
    pub fn bound_unit(&self, slot: u32) -> Option<TextureHandle> {
        self.units.get(slot as usize).copied().flatten()
    }

    /// Number of textures uploaded and not yet deleted.
    #[inline]
    pub fn live_textures(&self) -> usize {
        self.live.len()
    }
}

impl GraphicsBackend for RecordingBackend {
    fn max_texture_units(&self) -> usize {
        self.max_units
    }

    fn upload_texture_2d(&mut self, image: &RawImage) -> Result<TextureHandle, BackendError> {
        let format = image.format().ok_or_else(|| {
            BackendError::InvalidImage(format!("{} channels", image.channels))
        })?;

        let texture = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(texture, format);
        self.calls.push(BackendCall::Upload {
            texture,
            width: image.width,
            height: image.height,
            format,
        });
        Ok(texture)
    }

    fn generate_mipmaps(&mut self, texture: TextureHandle) -> Result<(), BackendError> {
        if !self.live.contains_key(&texture) {
            return Err(BackendError::UnknownTexture(texture));
        }
        self.calls.push(BackendCall::GenerateMipmaps(texture));
        Ok(())
    }

    fn bind_texture_unit(&mut self, slot: u32, texture: TextureHandle) {
        if let Some(unit) = self.units.get_mut(slot as usize) {
            *unit = Some(texture);
        } else {
            log::warn!("bind to texture unit {slot} ignored: only {} units", self.max_units);
        }
        self.calls.push(BackendCall::BindUnit { slot, texture });
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if self.live.remove(&texture).is_some() {
            for unit in self.units.iter_mut().filter(|u| **u == Some(texture)) {
                *unit = None;
            }
        }
        self.calls.push(BackendCall::Delete(texture));
    }

    fn load_mesh(&mut self, kind: PrimitiveKind) {
        self.calls.push(BackendCall::LoadMesh(kind));
    }

    fn draw_primitive(&mut self, kind: PrimitiveKind, uniforms: &UniformTable) {
        self.calls.push(BackendCall::Draw(kind));
        self.draws.push(RecordedDraw {
            kind,
            uniforms: uniforms.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32) -> RawImage {
        RawImage::new(vec![0; (width * height * 3) as usize], width, height, 3)
    }

    #[test]
    fn handles_are_unique_and_tracked() {
        let mut backend = RecordingBackend::new();
        let a = backend.upload_texture_2d(&rgb(2, 2)).unwrap();
        let b = backend.upload_texture_2d(&rgb(1, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_textures(), 2);
    }

    #[test]
    fn mipmaps_for_unknown_texture_fail() {
        let mut backend = RecordingBackend::new();
        let err = backend.generate_mipmaps(TextureHandle(99)).unwrap_err();
        assert!(matches!(err, BackendError::UnknownTexture(TextureHandle(99))));
    }

    #[test]
    fn delete_unbinds_units() {
        let mut backend = RecordingBackend::new();
        let t = backend.upload_texture_2d(&rgb(1, 1)).unwrap();
        backend.bind_texture_unit(3, t);
        assert_eq!(backend.bound_unit(3), Some(t));

        backend.delete_texture(t);
        assert_eq!(backend.bound_unit(3), None);
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn out_of_range_unit_is_ignored() {
        let mut backend = RecordingBackend::with_texture_units(2);
        let t = backend.upload_texture_2d(&rgb(1, 1)).unwrap();
        backend.bind_texture_unit(5, t);
        assert_eq!(backend.bound_unit(5), None);
    }
}
