//! Logging utilities.
//!
//! Resource loading and state binding report every soft failure through the
//! `log` facade; this module only wires up the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
