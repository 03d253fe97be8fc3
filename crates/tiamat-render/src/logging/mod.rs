//! Logger setup for applications embedding the renderer.
//!
//! The crate itself only speaks the `log` facade; binaries opt into the
//! `env_logger` backend through [`init_logging`] to see dropped quads,
//! atlas overflows and the other recoverable render errors.

mod init;

pub use init::{LoggingConfig, init_logging};
