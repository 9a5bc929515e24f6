//! Coordinate and transform types shared by the binder and the scene.
//!
//! World space is right-handed, +Y up, matching the shading stage's
//! expectations for the `model` uniform.

mod color;
mod transform;

pub use color::ColorRgba;
pub use transform::{compose, Transform};
