#![forbid(unsafe_code)]

//! Command-line plumbing shared by the `nuon` binary.

/// TOML config file handling.
pub mod config;

/// Interactive loop and script runner.
pub mod repl;

pub use config::{CliConfig, ConfigError};
pub use repl::{ReplError, Session};
