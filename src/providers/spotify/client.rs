//! Spotify Web API HTTP client
//!
//! Uses an application access token supplied by the caller; acquiring and
//! refreshing tokens happens outside this crate.
//! See: https://developer.spotify.com/documentation/web-api

use async_trait::async_trait;

use super::{adapter, dto};
use crate::album::{AlbumRecord, Source};
use crate::providers::http::{self, HttpSettings};
use crate::providers::{AlbumProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Spotify API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(access_token: impl Into<String>, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token, settings)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: http::build_client(settings)?,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// Look up a full album object by Spotify id
    pub async fn get_album(&self, album_id: &str) -> Result<Option<dto::Album>, ProviderError> {
        let url = format!("{}/albums/{}", self.base_url, urlencoding::encode(album_id));
        let request = self.http_client.get(&url).bearer_auth(&self.access_token);
        http::send_json(request).await
    }

    /// Search albums by title and artist, returning the first hit
    pub async fn search_album(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<dto::Album>, ProviderError> {
        let url = format!("{}/search", self.base_url);
        let query = format!("album:{} artist:{}", title, artist);
        let request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str()), ("type", "album"), ("limit", "1")]);

        let response: Option<dto::SearchResponse> = http::send_json(request).await?;
        Ok(response
            .and_then(|r| r.albums)
            .and_then(|albums| albums.items.into_iter().next()))
    }
}

#[async_trait]
impl AlbumProvider for SpotifyClient {
    fn source(&self) -> Source {
        Source::Spotify
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self.get_album(id).await?.map(adapter::to_record))
    }

    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self.search_album(title, artist).await?.map(adapter::to_record))
    }
}
