//! Configuration display command.

use std::path::Path;

use crate::config::{self, Config, ConfigError, Credentials};
use crate::error::Result;

/// Print the config file location and the effective settings (secrets masked)
pub fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> Result<()> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config::config_path(),
    };

    match &path {
        Some(p) if init && !p.exists() => {
            config::save_to(config, p)?;
            println!("✓ Wrote default configuration to {}", p.display());
        }
        Some(p) => println!("# Config file: {}", p.display()),
        None => println!("# No config directory available, using defaults"),
    }
    println!();
    let shown = toml::to_string_pretty(&masked(config)).map_err(ConfigError::Serialize)?;
    println!("{}", shown);
    Ok(())
}

fn masked(config: &Config) -> Config {
    let mask = |value: &Option<String>| value.as_ref().map(|_| "********".to_string());
    let credentials = &config.credentials;

    Config {
        credentials: Credentials {
            spotify_access_token: mask(&credentials.spotify_access_token),
            discogs_key: mask(&credentials.discogs_key),
            discogs_secret: mask(&credentials.discogs_secret),
            lastfm_api_key: mask(&credentials.lastfm_api_key),
        },
        ..config.clone()
    }
}
