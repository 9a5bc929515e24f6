//! Graphics backend seam.
//!
//! This module is responsible for:
//! - the [`GraphicsBackend`] trait the registry and scene talk to
//! - a recording backend for headless runs and tests
//! - a wgpu backend that uploads textures and packs per-draw state

mod backend;
mod error;
mod gpu;
mod gpu_backend;
mod init;
mod recording;

pub use backend::{GraphicsBackend, PrimitiveKind, TextureFormat, TextureHandle, MAX_TEXTURE_UNITS};
pub use error::BackendError;
pub use gpu::Gpu;
pub use gpu_backend::{GpuBackend, GpuDraw, GpuFrameStats};
pub use init::GpuInit;
pub use recording::{BackendCall, RecordedDraw, RecordingBackend};
