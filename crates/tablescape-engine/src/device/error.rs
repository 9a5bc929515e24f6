use thiserror::Error;

use super::TextureHandle;

/// Failures reported by a [`GraphicsBackend`](super::GraphicsBackend).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(String),
    #[error("failed to create device: {0}")]
    DeviceRequest(String),
    #[error("unknown texture handle {0:?}")]
    UnknownTexture(TextureHandle),
    #[error("invalid image data: {0}")]
    InvalidImage(String),
}
