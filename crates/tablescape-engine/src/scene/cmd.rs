use glam::Vec2;

use crate::coords::{ColorRgba, Transform};
use crate::device::PrimitiveKind;
use crate::paint::Paint;

/// One entry of a composition list.
///
/// `color` is always set; when `texture` is also present the texture wins
/// and the color only matters as a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub label: String,
    pub kind: PrimitiveKind,
    pub transform: Transform,
    pub color: ColorRgba,
    pub texture: Option<String>,
    pub material: Option<String>,
    pub uv_scale: Option<Vec2>,
}

impl SceneObject {
    pub fn new(label: impl Into<String>, kind: PrimitiveKind, transform: Transform) -> Self {
        Self {
            label: label.into(),
            kind,
            transform,
            color: ColorRgba::white(),
            texture: None,
            material: None,
            uv_scale: None,
        }
    }

    pub fn color(mut self, color: ColorRgba) -> Self {
        self.color = color;
        self
    }

    pub fn texture(mut self, tag: impl Into<String>) -> Self {
        self.texture = Some(tag.into());
        self
    }

    pub fn material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some(Vec2::new(u, v));
        self
    }

    /// Effective paint: the texture if one is named, otherwise the color.
    pub fn paint(&self) -> Paint {
        match &self.texture {
            Some(tag) => Paint::texture(tag.clone()),
            None => Paint::solid(self.color),
        }
    }
}
