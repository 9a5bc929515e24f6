//! Texture and material registries.
//!
//! Both registries are owned containers: they live inside the scene composer
//! and are dropped with it. Lookups are linear, first match wins.

mod decode;
mod error;
mod material;
mod texture;

pub use decode::{decode_image, RawImage};
pub use error::{LoadError, LookupError, ResourceKind};
pub use material::{Material, MaterialEntry, MaterialRegistry};
pub use texture::{TextureEntry, TextureRegistry};
