use glam::{Mat4, Vec2, Vec4};

use crate::resources::{LookupError, MaterialRegistry, TextureRegistry};

use super::names;
use super::{UniformSink, UniformValue};

/// Writes per-draw state to a uniform sink using the named-uniform protocol.
///
/// Every call overwrites only the uniforms it names. Anything a draw does not
/// set is whatever the previous draw left behind.
pub struct ShaderBinder<'a, S: UniformSink + ?Sized> {
    sink: &'a mut S,
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
}

impl<'a, S: UniformSink + ?Sized> ShaderBinder<'a, S> {
    pub fn new(sink: &'a mut S, textures: &'a TextureRegistry, materials: &'a MaterialRegistry) -> Self {
        Self { sink, textures, materials }
    }

    /// Writes the model matrix.
    pub fn set_transform(&mut self, model: Mat4) {
        self.sink.set_named(names::MODEL, UniformValue::Mat4(model));
    }

    /// Selects flat color mode and writes the color.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.sink.set_named(names::USE_TEXTURE, UniformValue::Bool(false));
        self.sink.set_named(names::OBJECT_COLOR, UniformValue::Vec4(Vec4::new(r, g, b, a)));
    }

    /// Selects texture mode and writes the sampler index for `tag`.
    ///
    /// An unknown tag still switches to texture mode and writes
    /// [`names::SAMPLER_NOT_FOUND`]; the miss is only logged.
    pub fn set_texture(&mut self, tag: &str) {
        self.sink.set_named(names::USE_TEXTURE, UniformValue::Bool(true));

        let slot = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("{}; sampler set to {}", LookupError::texture(tag), names::SAMPLER_NOT_FOUND);
                names::SAMPLER_NOT_FOUND
            }
        };
        self.sink.set_named(names::OBJECT_TEXTURE, UniformValue::Int(slot));
    }

    /// Writes the texture coordinate scale.
    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.sink.set_named(names::UV_SCALE, UniformValue::Vec2(Vec2::new(u, v)));
    }

    /// Writes the material defined under `tag`.
    ///
    /// Nothing is written when the registry is empty or the tag is unknown,
    /// so the previous draw's material stays bound.
    pub fn set_material(&mut self, tag: &str) {
        if self.materials.is_empty() {
            log::debug!("no materials defined; \"{tag}\" not bound");
            return;
        }

        let Some(material) = self.materials.find(tag) else {
            log::warn!("{}; previous material stays bound", LookupError::material(tag));
            return;
        };

        self.sink.set_named(names::MATERIAL_DIFFUSE, UniformValue::Vec3(material.diffuse_color));
        self.sink.set_named(names::MATERIAL_SPECULAR, UniformValue::Vec3(material.specular_color));
        self.sink.set_named(names::MATERIAL_SHININESS, UniformValue::Float(material.shininess));
    }
}
