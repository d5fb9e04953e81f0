//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `spec` - Print the configuration schema
//! - `check` - Test connection to the API
//! - `discover` - Print the stream catalog
//! - `streams` - List stream names
//! - `read` - Extract data from streams as Singer messages

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
