use std::path::PathBuf;

/// How per-draw shading state reaches the uniform sink.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StatePolicy {
    /// Named-uniform calls per object. Uniforms an object does not set keep
    /// the previous object's values, and unresolved textures bind sampler -1.
    #[default]
    Persistent,
    /// Each object is resolved into a complete [`DrawState`](crate::shader::DrawState)
    /// first. Nothing is inherited; objects without a material draw unlit and
    /// unresolved textures fall back to the object's color.
    Explicit,
}

/// Scene preparation settings.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Directory texture paths are resolved against.
    pub texture_root: PathBuf,
    pub state_policy: StatePolicy,
    /// Flip images to bottom-up rows on load, as GL texture coordinates expect.
    pub flip_vertically: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_root: PathBuf::from("textures"),
            state_policy: StatePolicy::Persistent,
            flip_vertically: true,
        }
    }
}
