use std::path::PathBuf;

use glam::{Vec2, Vec3};

use crate::device::{GraphicsBackend, PrimitiveKind};
use crate::lighting::LightRig;
use crate::paint::Paint;
use crate::resources::{LoadError, LookupError, MaterialRegistry, RawImage, TextureRegistry};
use crate::shader::{DrawState, ObjectUniforms, ShaderBinder, SurfaceBinding, UniformTable};

use super::{CompositionList, SceneConfig, SceneObject, StatePolicy};

/// A texture to register: file path relative to the texture root, and tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSource {
    pub path: PathBuf,
    pub tag: String,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self { path: path.into(), tag: tag.into() }
    }
}

/// A material to define during preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDef {
    pub tag: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl MaterialDef {
    pub fn new(tag: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self { tag: tag.into(), diffuse, specular, shininess }
    }
}

/// Outcome of [`SceneComposer::prepare`].
#[derive(Debug, Default)]
pub struct PrepareReport {
    /// `(tag, slot)` for every texture that loaded.
    pub loaded: Vec<(String, u32)>,
    /// `(tag, error)` for every texture that did not.
    pub failed: Vec<(String, LoadError)>,
    pub materials: usize,
    pub meshes: usize,
}

/// What one draw sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub label: String,
    pub kind: PrimitiveKind,
    pub state: ObjectUniforms,
}

/// Outcome of [`SceneComposer::render`].
#[derive(Debug, Default)]
pub struct FrameReport {
    pub draws: Vec<DrawRecord>,
}

/// Owns the registries, the uniform state and the backend for one scene.
///
/// Created at scene-load time; textures are released on drop.
pub struct SceneComposer<B: GraphicsBackend> {
    backend: B,
    config: SceneConfig,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    uniforms: UniformTable,
    prepared: bool,
}

impl<B: GraphicsBackend> SceneComposer<B> {
    pub fn new(backend: B, config: SceneConfig) -> Self {
        let textures = TextureRegistry::new().with_vertical_flip(config.flip_vertically);
        Self {
            backend,
            config,
            textures,
            materials: MaterialRegistry::new(),
            uniforms: UniformTable::new(),
            prepared: false,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    #[inline]
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Resident uniform state.
    #[inline]
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    /// Registers already-decoded pixels, bypassing the texture root.
    ///
    /// Must happen before [`prepare`](Self::prepare), which binds texture units.
    pub fn register_texture_image(&mut self, image: &RawImage, tag: &str) -> Result<u32, LoadError> {
        self.textures.register_image(&mut self.backend, image, tag)
    }

    /// Loads textures, binds them, defines materials, uploads lights and
    /// loads meshes, in that order.
    ///
    /// Texture failures are collected in the report and logged; preparation
    /// always completes.
    pub fn prepare(
        &mut self,
        textures: &[TextureSource],
        materials: &[MaterialDef],
        lights: &LightRig,
        meshes: &[PrimitiveKind],
    ) -> PrepareReport {
        let mut report = PrepareReport::default();

        for source in textures {
            let path = self.config.texture_root.join(&source.path);
            match self.textures.register(&mut self.backend, &path, source.tag.as_str()) {
                Ok(slot) => report.loaded.push((source.tag.clone(), slot)),
                Err(err) => report.failed.push((source.tag.clone(), err)),
            }
        }
        self.textures.bind_all(&mut self.backend);

        for def in materials {
            self.materials.define(def.tag.as_str(), def.diffuse, def.specular, def.shininess);
        }
        report.materials = materials.len();

        lights.upload(&mut self.uniforms);

        for &kind in meshes {
            self.backend.load_mesh(kind);
        }
        report.meshes = meshes.len();

        self.prepared = true;
        log::info!(
            "scene prepared: {} textures ({} failed), {} materials, {} meshes",
            report.loaded.len(),
            report.failed.len(),
            report.materials,
            report.meshes
        );
        report
    }

    /// Draws every object in order.
    pub fn render(&mut self, list: &CompositionList) -> FrameReport {
        if !self.prepared {
            log::warn!("rendering before prepare(); textures are not bound");
        }

        let mut report = FrameReport {
            draws: Vec::with_capacity(list.len()),
        };

        for object in list {
            match self.config.state_policy {
                StatePolicy::Persistent => self.bind_persistent(object),
                StatePolicy::Explicit => {
                    let state = self.resolve(object);
                    state.apply(&mut self.uniforms);
                }
            }

            self.backend.draw_primitive(object.kind, &self.uniforms);

            let state = ObjectUniforms::from_table(&self.uniforms);
            log::trace!(
                "draw {} ({}): texture {} slot {}, lighting {}",
                object.label,
                object.kind.name(),
                state.use_texture,
                state.texture_slot,
                state.use_lighting
            );
            report.draws.push(DrawRecord {
                label: object.label.clone(),
                kind: object.kind,
                state,
            });
        }

        report
    }

    /// Releases all textures. Also runs on drop.
    pub fn release(&mut self) {
        if !self.textures.is_empty() {
            log::debug!("releasing {} textures", self.textures.len());
        }
        self.textures.destroy_all(&mut self.backend);
        self.prepared = false;
    }

    fn bind_persistent(&mut self, object: &SceneObject) {
        let mut binder = ShaderBinder::new(&mut self.uniforms, &self.textures, &self.materials);

        binder.set_transform(object.transform.compose());

        let c = object.color;
        binder.set_color(c.r, c.g, c.b, c.a);
        if let Some(tag) = &object.texture {
            binder.set_texture(tag);
        }

        if let Some(tag) = &object.material {
            binder.set_material(tag);
        }

        if let Some(uv) = object.uv_scale {
            binder.set_uv_scale(uv.x, uv.y);
        }
    }

    /// Resolves tags into a complete draw state.
    fn resolve(&self, object: &SceneObject) -> DrawState {
        let surface = match object.paint() {
            Paint::Solid(color) => SurfaceBinding::Color(color),
            Paint::Texture(tag) => match self.textures.find_slot(&tag) {
                Some(slot) => SurfaceBinding::Texture { slot },
                None => {
                    log::warn!("{}; \"{}\" falls back to its color", LookupError::texture(&tag), object.label);
                    SurfaceBinding::Color(object.color)
                }
            },
        };

        let material = object.material.as_deref().and_then(|tag| {
            let found = self.materials.find(tag).copied();
            if found.is_none() {
                log::warn!("{}; \"{}\" draws unlit", LookupError::material(tag), object.label);
            }
            found
        });

        DrawState::new(object.transform.compose(), surface)
            .with_material(material)
            .with_uv_scale(object.uv_scale.unwrap_or(Vec2::ONE))
    }
}

impl<B: GraphicsBackend> Drop for SceneComposer<B> {
    fn drop(&mut self) {
        self.release();
    }
}
