//! Shader state binding.
//!
//! Two ways to drive the shading stage:
//! - [`ShaderBinder`]: the named-uniform protocol, one call per uniform group,
//!   state persists across draws
//! - [`DrawState`]: a fully resolved record written in one go
//!
//! Both end up as [`UniformSink::set_named`] calls.

mod binder;
mod block;
pub mod names;
mod state;
mod uniform;

pub use binder::ShaderBinder;
pub use block::ObjectUniforms;
pub use state::{DrawState, SurfaceBinding};
pub use uniform::{UniformSink, UniformTable, UniformValue};
