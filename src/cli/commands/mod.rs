//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `resolve`: Resolve an album from partial identifiers
//! - `add`: Seed the local catalog from a JSON document
//! - `settings`: Show or initialize the configuration file

mod add;
mod resolve;
mod settings;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config, Credentials};

pub use add::cmd_add;
pub use resolve::cmd_resolve;
pub use settings::cmd_config;

/// Album Resolver CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a canonical album and print it as JSON
    Resolve(ResolveArgs),
    /// Add an album document (JSON object with title and artist) to the local catalog
    Add {
        /// Path to the JSON file
        file: PathBuf,
        /// Database path (overrides config)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Identifiers and options for `resolve`
#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// Local catalog id
    #[arg(long)]
    pub db_id: Option<String>,
    /// Spotify album id
    #[arg(long)]
    pub spotify_id: Option<String>,
    /// MusicBrainz release id
    #[arg(long)]
    pub mbid: Option<String>,
    /// Discogs release id
    #[arg(long)]
    pub discogs_id: Option<String>,
    /// Album title (requires --artist)
    #[arg(short, long)]
    pub title: Option<String>,
    /// Artist name (requires --title)
    #[arg(short, long)]
    pub artist: Option<String>,
    /// Comma-separated sources: db,spotify,discogs,lastfm,musicbrainz
    #[arg(short, long)]
    pub sources: Option<String>,
    /// Global provider timeout in seconds
    #[arg(long)]
    pub timeout: Option<f64>,
    /// Maximum concurrent provider calls (overrides config)
    #[arg(long)]
    pub max_concurrency: Option<usize>,
    /// Database path (overrides config)
    #[arg(long)]
    pub db: Option<PathBuf>,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Provider credentials; flags and env vars override the config file
#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Spotify access token
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub spotify_token: Option<String>,
    /// Discogs consumer key
    #[arg(long, env = "DISCOGS_KEY", hide_env_values = true)]
    pub discogs_key: Option<String>,
    /// Discogs consumer secret
    #[arg(long, env = "DISCOGS_SECRET", hide_env_values = true)]
    pub discogs_secret: Option<String>,
    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub lastfm_api_key: Option<String>,
}

impl CredentialArgs {
    /// Overlay any given values onto the configured credentials.
    pub fn apply(&self, credentials: &mut Credentials) {
        let overlay = [
            (&self.spotify_token, &mut credentials.spotify_access_token),
            (&self.discogs_key, &mut credentials.discogs_key),
            (&self.discogs_secret, &mut credentials.discogs_secret),
            (&self.lastfm_api_key, &mut credentials.lastfm_api_key),
        ];
        for (arg, slot) in overlay {
            if arg.is_some() {
                slot.clone_from(arg);
            }
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = load_config(cli);

    match &cli.command {
        Commands::Resolve(args) => cmd_resolve(&rt, &config, args),
        Commands::Add { file, db } => cmd_add(&rt, &config, file, db.as_deref()),
        Commands::Config { init } => Ok(cmd_config(&config, cli.config.as_deref(), *init)?),
    }
}

fn load_config(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// sqlx URL for the database, preferring the command-line path.
pub(crate) fn database_url(config: &Config, db: Option<&std::path::Path>) -> String {
    match db {
        Some(path) => config::sqlite_url(path),
        None => config.database.url(),
    }
}
