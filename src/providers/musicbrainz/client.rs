//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use async_trait::async_trait;

use super::{adapter, dto};
use crate::album::{AlbumRecord, Source};
use crate::providers::http::{self, HttpSettings};
use crate::providers::{AlbumProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Sub-resources included in release lookups
const RELEASE_INCLUDES: &str = "artists+release-groups+recordings+genres+labels";

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicBrainzClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL, settings)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: http::build_client(settings)?,
            base_url: base_url.into(),
        })
    }

    /// Look up a release by MusicBrainz ID
    pub async fn lookup_release(&self, mbid: &str) -> Result<Option<dto::Release>, ProviderError> {
        let url = format!(
            "{}/release/{}?fmt=json&inc={}",
            self.base_url,
            urlencoding::encode(mbid),
            RELEASE_INCLUDES
        );
        http::send_json(self.http_client.get(&url)).await
    }

    /// Search releases by title and artist, returning the best-scored hit
    pub async fn search_release(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<dto::Release>, ProviderError> {
        let url = format!("{}/release", self.base_url);
        let query = format!(
            "artist:\"{}\" AND release:\"{}\"",
            escape_lucene(artist),
            escape_lucene(title)
        );
        let request = self
            .http_client
            .get(&url)
            .query(&[("query", query.as_str()), ("fmt", "json"), ("limit", "1")]);

        let response: Option<dto::SearchResponse> = http::send_json(request).await?;
        Ok(response.and_then(|r| r.releases.into_iter().next()))
    }
}

/// Escape characters that are special inside a quoted Lucene phrase
fn escape_lucene(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl AlbumProvider for MusicBrainzClient {
    fn source(&self) -> Source {
        Source::Musicbrainz
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self.lookup_release(id).await?.map(adapter::to_record))
    }

    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self
            .search_release(title, artist)
            .await?
            .map(adapter::to_record))
    }
}
