//! Static scene lighting.
//!
//! Lights are uploaded once during preparation and never touched per draw.

mod light;

pub use light::{DirectionalLight, LightRig, PointLight};
