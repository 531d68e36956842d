//! Album Resolver - canonical album records from partial identifiers.
//!
//! Looks an album up in the local catalog and in external metadata providers
//! (Spotify, Discogs, Last.fm, MusicBrainz) in parallel, then merges what
//! comes back into one record by fixed source priority.

pub mod aggregation;
pub mod album;
pub mod cli;
pub mod config;
pub mod error;
pub mod providers;
pub mod store;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging. Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("album_resolver=info".parse()?))
        .init();

    cli::run_command(&args)
}
