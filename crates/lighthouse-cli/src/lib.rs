//! Lighthouse CLI library.
//!
//! Configuration and credential loading, input acquisition, output
//! formatting and the command implementations behind the `lighthouse` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
