//! External album metadata providers.
//!
//! Each provider lives in its own module with the same layering:
//! - `dto`: exact API response shapes (with contract tests)
//! - `adapter`: DTO -> [`AlbumRecord`](crate::album::AlbumRecord) conversion
//! - `client`: HTTP client implementing [`AlbumProvider`]

pub mod discogs;
pub mod http;
pub mod lastfm;
pub mod musicbrainz;
pub mod spotify;
mod traits;

use std::sync::Arc;

pub use http::HttpSettings;
pub use traits::{AlbumProvider, ProviderError};

use crate::config::{Credentials, ProvidersConfig};

/// Build a client for every provider that has credentials.
///
/// MusicBrainz needs none and is always built. Discogs needs both key and secret.
pub fn from_config(
    credentials: &Credentials,
    config: &ProvidersConfig,
) -> Result<Vec<Arc<dyn AlbumProvider>>, ProviderError> {
    let settings = config.http_settings();
    let mut providers: Vec<Arc<dyn AlbumProvider>> = Vec::new();

    match credentials.spotify_access_token.as_deref() {
        Some(token) if !token.is_empty() => {
            providers.push(Arc::new(spotify::SpotifyClient::with_base_url(
                &config.spotify_base_url,
                token,
                &settings,
            )?));
        }
        _ => tracing::debug!("No Spotify token configured, provider disabled"),
    }

    match (
        credentials.discogs_key.as_deref(),
        credentials.discogs_secret.as_deref(),
    ) {
        (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
            providers.push(Arc::new(discogs::DiscogsClient::with_base_url(
                &config.discogs_base_url,
                key,
                secret,
                &settings,
            )?));
        }
        _ => tracing::debug!("No Discogs key/secret configured, provider disabled"),
    }

    match credentials.lastfm_api_key.as_deref() {
        Some(key) if !key.is_empty() => {
            providers.push(Arc::new(lastfm::LastfmClient::with_base_url(
                &config.lastfm_base_url,
                key,
                &settings,
            )?));
        }
        _ => tracing::debug!("No Last.fm API key configured, provider disabled"),
    }

    providers.push(Arc::new(musicbrainz::MusicBrainzClient::with_base_url(
        &config.musicbrainz_base_url,
        &settings,
    )?));

    Ok(providers)
}
