//! Discogs API Data Transfer Objects
//!
//! These types match what the Discogs database API returns.
//! DO NOT use these types outside the discogs module - convert to domain types.
//!
//! API Reference: https://www.discogs.com/developers#page:database

use serde::{Deserialize, Serialize};

/// `/releases/{id}` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// 0 when unknown
    pub year: Option<i32>,
    pub country: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub community: Option<Community>,
    pub lowest_price: Option<f64>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// "primary" or "secondary"
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub position: Option<String>,
    pub title: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Format {
    pub name: String,
    pub qty: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
    pub catno: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Community {
    pub have: Option<u64>,
    pub want: Option<u64>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Rating {
    pub average: Option<f64>,
    pub count: Option<u64>,
}

/// `/database/search` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A search hit. Titles come as "Artist - Title" and the year is a string.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    pub year: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    pub cover_image: Option<String>,
    pub community: Option<Community>,
}

/// Error response: `{"message": "Release not found."}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let json = r#"{
            "id": 830227,
            "title": "OK Computer",
            "artists": [{"id": 3840, "name": "Radiohead", "anv": "", "join": ""}],
            "year": 1997,
            "country": "UK",
            "genres": ["Electronic", "Rock"],
            "styles": ["Alternative Rock"],
            "images": [
                {"type": "secondary", "uri": "https://img/back.jpg"},
                {"type": "primary", "uri": "https://img/front.jpg"}
            ],
            "tracklist": [{"position": "1", "title": "Airbag", "duration": "4:44"}],
            "formats": [{"name": "CD", "qty": "1"}],
            "labels": [{"name": "Parlophone", "catno": "NODATA 02"}],
            "community": {"have": 120, "want": 30, "rating": {"average": 4.6, "count": 900}},
            "lowest_price": 9.5
        }"#;

        let release: Release = serde_json::from_str(json).expect("Should parse release");

        assert_eq!(release.id, 830227);
        assert_eq!(release.artists[0].name, "Radiohead");
        assert_eq!(release.images[1].image_type.as_deref(), Some("primary"));
        assert_eq!(release.community.unwrap().rating.unwrap().average, Some(4.6));
    }

    #[test]
    fn test_parse_minimal_release() {
        let json = r#"{"id": 1, "title": "Untitled"}"#;
        let release: Release = serde_json::from_str(json).expect("Should parse minimal release");
        assert!(release.artists.is_empty());
        assert!(release.year.is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "pagination": {"page": 1, "pages": 10, "per_page": 1, "items": 10},
            "results": [{
                "id": 830227,
                "type": "release",
                "title": "Radiohead - OK Computer",
                "year": "1997",
                "genre": ["Electronic", "Rock"],
                "style": ["Alternative Rock"],
                "format": ["CD", "Album"],
                "label": ["Parlophone"],
                "cover_image": "https://img/cover.jpg"
            }]
        }"#;

        let search: SearchResponse = serde_json::from_str(json).expect("Should parse search");
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].year.as_deref(), Some("1997"));
    }
}
