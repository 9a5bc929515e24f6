use glam::{Mat4, Vec2};

use crate::coords::ColorRgba;
use crate::resources::Material;

use super::names;
use super::{UniformSink, UniformValue};

/// Flat color or texture slot for one draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SurfaceBinding {
    Color(ColorRgba),
    Texture { slot: u32 },
}

/// Complete per-draw shading state with every tag already resolved.
///
/// [`DrawState::apply`] writes each per-draw uniform, so no value is ever
/// carried over from the previous draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    pub model: Mat4,
    pub surface: SurfaceBinding,
    /// `None` draws unlit.
    pub material: Option<Material>,
    pub uv_scale: Vec2,
}

impl DrawState {
    pub fn new(model: Mat4, surface: SurfaceBinding) -> Self {
        Self {
            model,
            surface,
            material: None,
            uv_scale: Vec2::ONE,
        }
    }

    pub fn with_material(mut self, material: Option<Material>) -> Self {
        self.material = material;
        self
    }

    pub fn with_uv_scale(mut self, uv_scale: Vec2) -> Self {
        self.uv_scale = uv_scale;
        self
    }

    /// Translates this state into named-uniform writes.
    pub fn apply<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_named(names::MODEL, UniformValue::Mat4(self.model));

        match self.surface {
            SurfaceBinding::Color(color) => {
                sink.set_named(names::USE_TEXTURE, UniformValue::Bool(false));
                sink.set_named(names::OBJECT_COLOR, UniformValue::Vec4(color.to_vec4()));
            }
            SurfaceBinding::Texture { slot } => {
                sink.set_named(names::USE_TEXTURE, UniformValue::Bool(true));
                sink.set_named(names::OBJECT_TEXTURE, UniformValue::Int(slot as i32));
            }
        }

        sink.set_named(names::UV_SCALE, UniformValue::Vec2(self.uv_scale));

        match &self.material {
            Some(material) => {
                sink.set_named(names::USE_LIGHTING, UniformValue::Bool(true));
                sink.set_named(names::MATERIAL_DIFFUSE, UniformValue::Vec3(material.diffuse_color));
                sink.set_named(names::MATERIAL_SPECULAR, UniformValue::Vec3(material.specular_color));
                sink.set_named(names::MATERIAL_SHININESS, UniformValue::Float(material.shininess));
            }
            None => sink.set_named(names::USE_LIGHTING, UniformValue::Bool(false)),
        }
    }
}
