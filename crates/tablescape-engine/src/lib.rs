//! Tablescape engine crate.
//!
//! Texture/material registries, shader-state binding and transform
//! composition for a fixed tabletop scene, over a pluggable graphics backend.

pub mod coords;
pub mod device;
pub mod lighting;
pub mod logging;
pub mod paint;
pub mod resources;
pub mod scene;
pub mod shader;
