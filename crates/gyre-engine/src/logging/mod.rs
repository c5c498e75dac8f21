//! Logging utilities.
//!
//! Centralizes logger initialization. Code everywhere else talks to the
//! standard `log` facade only.

mod init;

pub use init::{LoggingConfig, init_logging};
