//! Scene description and composition.
//!
//! Responsibilities:
//! - store the ordered list of objects to draw
//! - own registries and uniform state for one scene
//! - run the per-object bind-then-draw loop
//! - hold the literal table/chair/mug composition under `scene::tabletop`

mod cmd;
mod composer;
mod config;
mod list;

pub mod tabletop;

pub use cmd::SceneObject;
pub use composer::{DrawRecord, FrameReport, MaterialDef, PrepareReport, SceneComposer, TextureSource};
pub use config::{SceneConfig, StatePolicy};
pub use list::CompositionList;
