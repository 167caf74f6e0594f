//! Logging utilities.
//!
//! Everything in the engine reports through the `log` facade; this module
//! only wires `env_logger` up behind it.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
