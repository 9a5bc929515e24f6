use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::device::BackendError;

/// Texture registration failure.
///
/// None of these abort scene preparation; callers log them and continue
/// without the texture.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not load image {}: {source}", path.display())]
    DecodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// `image` names what was rejected: a file path, or a tag for
    /// pre-decoded pixels.
    #[error("{image} has {channels} channels; only 3 or 4 are supported")]
    UnsupportedChannels { image: String, channels: u8 },
    #[error("no texture slot left for \"{tag}\" ({max} slots in use)")]
    SlotsExhausted { tag: String, max: usize },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Which registry a lookup went to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Texture,
    Material,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Texture => f.write_str("texture"),
            ResourceKind::Material => f.write_str("material"),
        }
    }
}

/// Tag lookup miss. Only ever logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("{kind} tag \"{tag}\" is not registered")]
    TagNotFound { kind: ResourceKind, tag: String },
}

impl LookupError {
    pub fn texture(tag: &str) -> Self {
        LookupError::TagNotFound { kind: ResourceKind::Texture, tag: tag.to_owned() }
    }

    pub fn material(tag: &str) -> Self {
        LookupError::TagNotFound { kind: ResourceKind::Material, tag: tag.to_owned() }
    }
}
