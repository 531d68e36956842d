//! Command-line interface for album-resolver.
//!
//! Resolves albums, seeds the local catalog and shows configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
