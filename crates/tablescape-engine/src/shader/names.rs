//! Uniform names understood by the shading stage.

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

pub const DIRECTIONAL_DIRECTION: &str = "directionalLight.direction";
pub const DIRECTIONAL_AMBIENT: &str = "directionalLight.ambient";
pub const DIRECTIONAL_DIFFUSE: &str = "directionalLight.diffuse";
pub const DIRECTIONAL_SPECULAR: &str = "directionalLight.specular";
pub const DIRECTIONAL_ACTIVE: &str = "directionalLight.bActive";

/// Sampler index written when a texture tag does not resolve.
pub const SAMPLER_NOT_FOUND: i32 = -1;

/// Name of a field of the point light at `index`, e.g. `pointLights[0].position`.
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

#[cfg(test)]
mod tests {
    #[test]
    fn point_light_name() {
        assert_eq!(super::point_light(2, "bActive"), "pointLights[2].bActive");
    }
}
