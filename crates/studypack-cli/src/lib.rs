//! StudyPack CLI library.
//!
//! Configuration loading, command execution and output formatting for the
//! `studypack` binary. Commands open the SQLite database under the configured
//! data directory and drive the pipeline crates directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
