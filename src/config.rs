//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\album-resolver\config.toml
//! - macOS: ~/Library/Application Support/album-resolver/config.toml
//! - Linux: ~/.config/album-resolver/config.toml
//!
//! The config file is human-readable and editable. Command-line flags
//! override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::album::SourceSet;
use crate::providers::{HttpSettings, discogs, lastfm, musicbrainz, spotify};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Provider HTTP settings
    pub providers: ProvidersConfig,

    /// Aggregation settings
    pub aggregation: AggregationConfig,

    /// Local catalog settings
    pub database: DatabaseConfig,
}

/// Provider credentials. A provider without credentials is not registered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Ready-to-use Spotify bearer token
    pub spotify_access_token: Option<String>,

    /// Discogs consumer key
    pub discogs_key: Option<String>,

    /// Discogs consumer secret
    pub discogs_secret: Option<String>,

    /// Last.fm API key
    pub lastfm_api_key: Option<String>,
}

/// Provider HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Per-request deadline applied by every HTTP client
    pub request_timeout_secs: u64,

    /// User-Agent sent to every provider
    pub user_agent: String,

    pub spotify_base_url: String,
    pub discogs_base_url: String,
    pub lastfm_base_url: String,
    pub musicbrainz_base_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: crate::providers::http::USER_AGENT.to_string(),
            spotify_base_url: spotify::DEFAULT_BASE_URL.to_string(),
            discogs_base_url: discogs::DEFAULT_BASE_URL.to_string(),
            lastfm_base_url: lastfm::DEFAULT_BASE_URL.to_string(),
            musicbrainz_base_url: musicbrainz::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ProvidersConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            user_agent: self.user_agent.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Worker pool size shared by all requests
    pub max_concurrency: usize,

    /// Source tags used when a request names none (empty = all)
    pub default_sources: Vec<String>,

    /// Global fetch timeout used when a request gives none
    pub default_timeout_secs: Option<f64>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            default_sources: Vec::new(),
            default_timeout_secs: None,
        }
    }
}

impl AggregationConfig {
    pub fn default_sources(&self) -> SourceSet {
        SourceSet::parse(&self.default_sources)
    }

    pub fn default_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.default_timeout_secs.map(timeout_from_secs).transpose()
    }
}

/// A timeout given in seconds. Negative and non-finite values are rejected.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidTimeout(secs))
}

/// Local catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("album_resolver.db"),
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured path
    pub fn url(&self) -> String {
        sqlite_url(&self.path)
    }
}

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-resolver"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from an explicit path, with the same fallbacks as [`load`]
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to an explicit path
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Invalid timeout {0}: expected a non-negative number of seconds")]
    InvalidTimeout(f64),
}

// ============================================================================
// Tests
// ============================================================================
