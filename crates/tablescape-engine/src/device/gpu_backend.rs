use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::resources::RawImage;
use crate::shader::{ObjectUniforms, UniformTable};

use super::{BackendError, Gpu, GraphicsBackend, PrimitiveKind, TextureHandle, MAX_TEXTURE_UNITS};

const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    mip_level_count: u32,
    /// Level 0 pixels, kept until the mip chain has been written.
    base: Option<RgbaImage>,
}

/// A draw submitted during the current frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GpuDraw {
    pub kind: PrimitiveKind,
    /// Index into the frame's object-uniform buffer.
    pub uniform_index: u32,
}

/// Summary returned by [`GpuBackend::finish_frame`].
#[derive(Debug, Clone, Default)]
pub struct GpuFrameStats {
    pub draws: usize,
    pub uniform_bytes: u64,
    pub per_kind: HashMap<PrimitiveKind, usize>,
}

/// wgpu implementation of [`GraphicsBackend`].
///
/// Textures are uploaded as RGBA8 sRGB with a full mip chain computed on the
/// CPU. Each draw packs the resident uniform table into an
/// [`ObjectUniforms`] block; `finish_frame` flushes all blocks into a single
/// storage buffer. Mesh geometry is supplied by the caller's mesh pipeline.
pub struct GpuBackend {
    gpu: Gpu,
    sampler: wgpu::Sampler,
    max_units: usize,
    next_handle: u64,
    textures: HashMap<TextureHandle, GpuTexture>,
    units: Vec<Option<TextureHandle>>,
    loaded_meshes: Vec<PrimitiveKind>,

    frame_draws: Vec<GpuDraw>,
    frame_uniforms: Vec<ObjectUniforms>,
    uniform_buffer: Option<wgpu::Buffer>,
}

impl GpuBackend {
    pub fn new(gpu: Gpu) -> Self {
        let device_units = gpu.device().limits().max_sampled_textures_per_shader_stage as usize;
        let max_units = device_units.min(MAX_TEXTURE_UNITS);

        // Repeat wrapping with linear filtering, as the scene's UVs tile.
        let sampler = gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tablescape texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!("gpu backend ready: {max_units} texture units");

        Self {
            gpu,
            sampler,
            max_units,
            next_handle: 1,
            textures: HashMap::new(),
            units: vec![None; max_units],
            loaded_meshes: Vec::new(),
            frame_draws: Vec::new(),
            frame_uniforms: Vec::new(),
            uniform_buffer: None,
        }
    }

    #[inline]
    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// View bound to texture unit `slot`, if any.
    pub fn unit_view(&self, slot: u32) -> Option<&wgpu::TextureView> {
        let handle = self.units.get(slot as usize).copied().flatten()?;
        self.textures.get(&handle).map(|t| &t.view)
    }

    /// Draws recorded since the last `finish_frame`.
    #[inline]
    pub fn frame_draws(&self) -> &[GpuDraw] {
        &self.frame_draws
    }

    /// Storage buffer holding the last flushed frame's object uniforms.
    #[inline]
    pub fn uniform_buffer(&self) -> Option<&wgpu::Buffer> {
        self.uniform_buffer.as_ref()
    }

    /// Uploads the frame's packed uniforms and resets per-frame state.
    pub fn finish_frame(&mut self) -> GpuFrameStats {
        let stats = frame_stats(&self.frame_draws, &self.frame_uniforms);

        if !self.frame_uniforms.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(&self.frame_uniforms);
            let current = self.uniform_buffer.as_ref().map(|buffer| buffer.size());
            if let Some(size) = grown_buffer_size(current, stats.uniform_bytes) {
                self.uniform_buffer = Some(self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
                    label: Some("tablescape object uniforms"),
                    size,
                    usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                }));
            }

            if let Some(buffer) = &self.uniform_buffer {
                self.gpu.queue().write_buffer(buffer, 0, bytes);
            }
        }

        self.gpu.queue().submit(std::iter::empty());

        self.frame_draws.clear();
        self.frame_uniforms.clear();
        stats
    }

    fn write_level(&self, texture: &wgpu::Texture, level: u32, pixels: &RgbaImage) {
        let (width, height) = pixels.dimensions();
        self.gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
    }
}

fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Size of mip `level` for a `width`x`height` base, never below 1x1.
fn mip_extent(width: u32, height: u32, level: u32) -> (u32, u32) {
    let shrink = |size: u32| size.checked_shr(level).unwrap_or(0).max(1);
    (shrink(width), shrink(height))
}

/// Rejects sizes the device cannot create, which wgpu would otherwise
/// report through its uncaptured-error handler.
fn check_extent(width: u32, height: u32, max_dimension: u32) -> Result<(), BackendError> {
    if width == 0 || height == 0 {
        return Err(BackendError::InvalidImage(format!("{width}x{height} texture is empty")));
    }
    if width.max(height) > max_dimension {
        return Err(BackendError::InvalidImage(format!(
            "{width}x{height} exceeds the device limit of {max_dimension} texels"
        )));
    }
    Ok(())
}

/// New allocation size when the current buffer cannot hold `needed` bytes.
fn grown_buffer_size(current: Option<u64>, needed: u64) -> Option<u64> {
    match current {
        Some(size) if size >= needed => None,
        _ => Some(needed.next_power_of_two()),
    }
}

fn frame_stats(draws: &[GpuDraw], uniforms: &[ObjectUniforms]) -> GpuFrameStats {
    let mut stats = GpuFrameStats {
        draws: draws.len(),
        uniform_bytes: std::mem::size_of_val(uniforms) as u64,
        ..Default::default()
    };
    for draw in draws {
        *stats.per_kind.entry(draw.kind).or_default() += 1;
    }
    stats
}

impl GraphicsBackend for GpuBackend {
    fn max_texture_units(&self) -> usize {
        self.max_units
    }

    fn upload_texture_2d(&mut self, image: &RawImage) -> Result<TextureHandle, BackendError> {
        check_extent(
            image.width,
            image.height,
            self.gpu.device().limits().max_texture_dimension_2d,
        )?;
        let rgba = image.to_rgba8().ok_or_else(|| {
            BackendError::InvalidImage(format!(
                "{}x{} with {} channels does not match {} bytes",
                image.width,
                image.height,
                image.channels,
                image.pixels.len()
            ))
        })?;

        let mip_level_count = mip_level_count(image.width, image.height);
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;

        let label = format!("tablescape texture #{}", handle.0);
        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some(label.as_str()),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.write_level(&texture, 0, &rgba);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.textures.insert(
            handle,
            GpuTexture {
                texture,
                view,
                mip_level_count,
                base: Some(rgba),
            },
        );
        Ok(handle)
    }

    fn generate_mipmaps(&mut self, handle: TextureHandle) -> Result<(), BackendError> {
        let (base, levels) = match self.textures.get_mut(&handle) {
            Some(t) => (t.base.take(), t.mip_level_count),
            None => return Err(BackendError::UnknownTexture(handle)),
        };
        // Already generated.
        let Some(base) = base else { return Ok(()) };

        let (width, height) = base.dimensions();
        for level in 1..levels {
            let (w, h) = mip_extent(width, height, level);
            let scaled = imageops::resize(&base, w, h, FilterType::Triangle);
            if let Some(t) = self.textures.get(&handle) {
                self.write_level(&t.texture, level, &scaled);
            }
        }
        Ok(())
    }

    fn bind_texture_unit(&mut self, slot: u32, texture: TextureHandle) {
        match self.units.get_mut(slot as usize) {
            Some(unit) => *unit = Some(texture),
            None => log::warn!("bind to texture unit {slot} ignored: only {} units", self.max_units),
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(t) = self.textures.remove(&texture) {
            t.texture.destroy();
            for unit in self.units.iter_mut().filter(|u| **u == Some(texture)) {
                *unit = None;
            }
        }
    }

    fn load_mesh(&mut self, kind: PrimitiveKind) {
        if !self.loaded_meshes.contains(&kind) {
            self.loaded_meshes.push(kind);
        }
    }

    fn draw_primitive(&mut self, kind: PrimitiveKind, uniforms: &UniformTable) {
        if !self.loaded_meshes.contains(&kind) {
            log::warn!("draw of {} before its mesh was loaded", kind.name());
        }

        let uniform_index = self.frame_uniforms.len() as u32;
        self.frame_uniforms.push(ObjectUniforms::from_table(uniforms));
        self.frame_draws.push(GpuDraw { kind, uniform_index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{names, UniformSink};

    #[test]
    fn mip_chain_length() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 17), 9);
    }

    // ── mip_extent ───────────────────────────────────────────────────────

    #[test]
    fn mip_levels_halve_down_to_one() {
        assert_eq!(mip_extent(256, 64, 0), (256, 64));
        assert_eq!(mip_extent(256, 64, 1), (128, 32));
        assert_eq!(mip_extent(256, 64, 6), (4, 1));
        assert_eq!(mip_extent(256, 64, 8), (1, 1));
    }

    #[test]
    fn odd_sizes_round_down() {
        assert_eq!(mip_extent(300, 17, 1), (150, 8));
        assert_eq!(mip_extent(300, 17, 5), (9, 1));
    }

    #[test]
    fn last_level_of_chain_is_one_texel() {
        let (w, h) = (300, 17);
        let last = mip_level_count(w, h) - 1;
        assert_eq!(mip_extent(w, h, last), (1, 1));
        assert_eq!(mip_extent(w, h, 40), (1, 1));
    }

    // ── check_extent ─────────────────────────────────────────────────────

    #[test]
    fn extent_within_limit_is_accepted() {
        assert!(check_extent(1, 1, 2048).is_ok());
        assert!(check_extent(2048, 512, 2048).is_ok());
    }

    #[test]
    fn oversized_extent_is_rejected() {
        let err = check_extent(4096, 4096, 2048).unwrap_err();
        assert!(matches!(err, BackendError::InvalidImage(_)));
        assert!(err.to_string().contains("2048"));
        assert!(check_extent(16, 2049, 2048).is_err());
    }

    #[test]
    fn empty_extent_is_rejected() {
        assert!(matches!(check_extent(0, 0, 2048), Err(BackendError::InvalidImage(_))));
        assert!(check_extent(64, 0, 2048).is_err());
    }

    // ── finish_frame bookkeeping ─────────────────────────────────────────

    #[test]
    fn buffer_grows_only_when_too_small() {
        assert_eq!(grown_buffer_size(None, 384), Some(512));
        assert_eq!(grown_buffer_size(Some(512), 384), None);
        assert_eq!(grown_buffer_size(Some(512), 512), None);
        assert_eq!(grown_buffer_size(Some(512), 640), Some(1024));
    }

    #[test]
    fn stats_count_draws_per_kind() {
        let mut table = UniformTable::new();
        table.set_named(names::USE_TEXTURE, true.into());
        table.set_named(names::OBJECT_TEXTURE, 3.into());
        let block = ObjectUniforms::from_table(&table);

        let draws = [
            GpuDraw { kind: PrimitiveKind::Box, uniform_index: 0 },
            GpuDraw { kind: PrimitiveKind::Plane, uniform_index: 1 },
            GpuDraw { kind: PrimitiveKind::Box, uniform_index: 2 },
        ];
        let stats = frame_stats(&draws, &[block; 3]);

        assert_eq!(stats.draws, 3);
        assert_eq!(stats.uniform_bytes, 3 * 128);
        assert_eq!(stats.per_kind.get(&PrimitiveKind::Box), Some(&2));
        assert_eq!(stats.per_kind.get(&PrimitiveKind::Plane), Some(&1));
        assert_eq!(stats.per_kind.get(&PrimitiveKind::Torus), None);

        let block_arr = [block];
        let bytes: &[u8] = bytemuck::cast_slice(&block_arr);
        assert_eq!(bytes.len(), 128);
        assert_eq!(block.use_texture, 1);
        assert_eq!(block.texture_slot, 3);
    }

    #[test]
    fn empty_frame_has_no_uniform_bytes() {
        let stats = frame_stats(&[], &[]);
        assert_eq!(stats.draws, 0);
        assert_eq!(stats.uniform_bytes, 0);
        assert!(stats.per_kind.is_empty());
    }
}
