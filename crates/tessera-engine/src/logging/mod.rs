//! Logger initialization.
//!
//! Library code logs through the `log` facade only; binaries call
//! [`init_logging`] once to install `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
