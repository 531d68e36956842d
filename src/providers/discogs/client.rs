//! Discogs HTTP client
//!
//! Authenticates with an application consumer key/secret pair.
//! API: https://www.discogs.com/developers

use async_trait::async_trait;

use super::{adapter, dto};
use crate::album::{AlbumRecord, Source};
use crate::providers::http::{self, HttpSettings};
use crate::providers::{AlbumProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

/// Discogs API client
pub struct DiscogsClient {
    http_client: reqwest::Client,
    base_url: String,
    authorization: String,
}

impl DiscogsClient {
    pub fn new(key: &str, secret: &str, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL, key, secret, settings)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        key: &str,
        secret: &str,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: http::build_client(settings)?,
            base_url: base_url.into(),
            authorization: format!("Discogs key={}, secret={}", key, secret),
        })
    }

    /// Look up a release by Discogs id
    pub async fn get_release(&self, release_id: &str) -> Result<Option<dto::Release>, ProviderError> {
        let url = format!("{}/releases/{}", self.base_url, urlencoding::encode(release_id));
        let request = self
            .http_client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization);
        http::send_json(request).await
    }

    /// Search releases by title and artist, returning the first hit
    pub async fn search_release(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<dto::SearchResult>, ProviderError> {
        let url = format!("{}/database/search", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .query(&[
                ("q", title),
                ("artist", artist),
                ("type", "release"),
                ("per_page", "1"),
            ]);

        let response: Option<dto::SearchResponse> = http::send_json(request).await?;
        Ok(response.and_then(|r| r.results.into_iter().next()))
    }
}

#[async_trait]
impl AlbumProvider for DiscogsClient {
    fn source(&self) -> Source {
        Source::Discogs
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self.get_release(id).await?.map(adapter::release_to_record))
    }

    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError> {
        Ok(self
            .search_release(title, artist)
            .await?
            .map(adapter::search_result_to_record))
    }
}
