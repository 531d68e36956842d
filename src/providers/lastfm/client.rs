//! Last.fm HTTP client
//!
//! Uses the `album.getInfo` method, by MusicBrainz id when one is known and by
//! artist/album name otherwise.
//! API: https://www.last.fm/api

use async_trait::async_trait;

use super::{adapter, dto};
use crate::album::{AlbumRecord, Source};
use crate::providers::http::{self, HttpSettings};
use crate::providers::{AlbumProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Last.fm API client
pub struct LastfmClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LastfmClient {
    pub fn new(api_key: impl Into<String>, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, settings)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: http::build_client(settings)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Call `album.getInfo` with the given selector parameters
    pub async fn album_info(
        &self,
        selector: &[(&str, &str)],
    ) -> Result<Option<dto::AlbumInfo>, ProviderError> {
        let request = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("method", "album.getInfo"),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .query(selector);

        let Some(response) = http::send_json::<dto::AlbumInfoResponse>(request).await? else {
            return Ok(None);
        };

        match (response.error, response.album) {
            (Some(dto::ERROR_NOT_FOUND), _) => Ok(None),
            (Some(code), _) => Err(ProviderError::Api(format!(
                "Last.fm error {}: {}",
                code,
                response.message.unwrap_or_default()
            ))),
            (None, album) => Ok(album),
        }
    }
}

#[async_trait]
impl AlbumProvider for LastfmClient {
    fn source(&self) -> Source {
        Source::Lastfm
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self
            .album_info(&[("mbid", id)])
            .await?
            .map(adapter::to_record))
    }

    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self
            .album_info(&[("artist", artist), ("album", title)])
            .await?
            .map(adapter::to_record))
    }
}
