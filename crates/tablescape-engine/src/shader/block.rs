use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

use super::names;
use super::UniformTable;

/// Per-object uniform block as laid out for GPU upload.
///
/// 128 bytes, every member 16-byte aligned so the block can be indexed in a
/// storage buffer without padding rules getting in the way.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub use_lighting: u32,
    pub diffuse_color: [f32; 3],
    pub texture_slot: i32,
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl ObjectUniforms {
    /// Packs the resident uniform state. Names never written fall back to
    /// neutral values (identity model, white, unit UV scale, unlit, untextured).
    pub fn from_table(table: &UniformTable) -> Self {
        Self {
            model: table.mat4(names::MODEL).unwrap_or(Mat4::IDENTITY).to_cols_array_2d(),
            object_color: table.vec4(names::OBJECT_COLOR).unwrap_or(Vec4::ONE).to_array(),
            uv_scale: table.vec2(names::UV_SCALE).unwrap_or(Vec2::ONE).to_array(),
            use_texture: table.flag(names::USE_TEXTURE).unwrap_or(false) as u32,
            use_lighting: table.flag(names::USE_LIGHTING).unwrap_or(false) as u32,
            diffuse_color: table.vec3(names::MATERIAL_DIFFUSE).unwrap_or(Vec3::ZERO).to_array(),
            texture_slot: table.int(names::OBJECT_TEXTURE).unwrap_or(names::SAMPLER_NOT_FOUND),
            specular_color: table.vec3(names::MATERIAL_SPECULAR).unwrap_or(Vec3::ZERO).to_array(),
            shininess: table.float(names::MATERIAL_SHININESS).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{UniformSink, UniformValue};

    #[test]
    fn block_is_128_bytes() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 128);
    }

    #[test]
    fn empty_table_packs_neutral_values() {
        let block = ObjectUniforms::from_table(&UniformTable::new());
        assert_eq!(block.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(block.uv_scale, [1.0, 1.0]);
        assert_eq!(block.use_texture, 0);
        assert_eq!(block.texture_slot, -1);
    }

    #[test]
    fn packs_written_values() {
        let mut table = UniformTable::new();
        table.set_named(names::USE_TEXTURE, UniformValue::Bool(true));
        table.set_named(names::OBJECT_TEXTURE, UniformValue::Int(3));
        table.set_named(names::MATERIAL_SHININESS, UniformValue::Float(80.0));
        table.set_named(names::MATERIAL_SPECULAR, UniformValue::Vec3(Vec3::new(0.66, 0.26, 0.18)));

        let block = ObjectUniforms::from_table(&table);
        assert_eq!(block.use_texture, 1);
        assert_eq!(block.texture_slot, 3);
        assert_eq!(block.shininess, 80.0);
        assert_eq!(block.specular_color, [0.66, 0.26, 0.18]);
    }
}
