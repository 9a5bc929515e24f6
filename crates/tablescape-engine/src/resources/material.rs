use glam::Vec3;

/// Lighting response of a surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    /// Specular exponent, never negative.
    pub shininess: f32,
}

impl Material {
    #[inline]
    pub fn new(diffuse_color: Vec3, specular_color: Vec3, shininess: f32) -> Self {
        Self {
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

/// A material with the tag it was defined under.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEntry {
    pub tag: String,
    pub material: Material,
}

/// Ordered list of material definitions.
///
/// Entries are immutable once defined. Lookup returns the first definition
/// of a tag, so later duplicates are shadowed.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    entries: Vec<MaterialEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn entries(&self) -> &[MaterialEntry] {
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

    /// Appends a material definition.
    ///
    /// A negative shininess is clamped to zero.
    pub fn define(&mut self, tag: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) {
        let tag = tag.into();
        let shininess = if shininess < 0.0 {
            log::warn!("material \"{tag}\": negative shininess {shininess} clamped to 0");
            0.0
        } else {
            shininess
        };

        if self.find(&tag).is_some() {
            log::warn!("material tag \"{tag}\" defined twice; later definition is shadowed");
        }

        self.entries.push(MaterialEntry {
            tag,
            material: Material::new(diffuse, specular, shininess),
        });
    }

    /// First material defined under `tag`.
    ///
    /// A miss is `None` whether or not the registry is empty.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| &e.material)
    }
}
