//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns for albums.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/get-an-album

use serde::{Deserialize, Serialize};

/// Album object. Search results return the "simplified" variant, which lacks
/// genres, label and tracks, so those default to empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    /// "album", "single" or "compilation"
    pub album_type: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// YYYY, YYYY-MM or YYYY-MM-DD depending on precision
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub total_tracks: Option<u32>,
    pub label: Option<String>,
    pub tracks: Option<Paging<Track>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub name: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
}

/// `/search?type=album` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub albums: Option<Paging<Album>>,
}

/// Error envelope: `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
