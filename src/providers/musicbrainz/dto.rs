//! MusicBrainz API Data Transfer Objects
//!
//! These types match what the MusicBrainz `/release` endpoints return.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API

use serde::{Deserialize, Serialize};

/// Release lookup response, also the element type of search results
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// MusicBrainz release ID
    pub id: String,
    pub title: String,
    /// Official, Bootleg, Promotion...
    pub status: Option<String>,
    /// YYYY, YYYY-MM or YYYY-MM-DD
    pub date: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    pub release_group: Option<ReleaseGroup>,
    #[serde(default)]
    pub media: Vec<Medium>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub label_info: Vec<LabelInfo>,
    /// Only present on search results (0-100)
    pub score: Option<u32>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    pub artist: Artist,
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub sort_name: Option<String>,
}

/// Release group (e.g., "OK Computer" across all editions)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    pub id: String,
    pub title: Option<String>,
    /// Album, Single, EP...
    pub primary_type: Option<String>,
    pub first_release_date: Option<String>,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    pub position: Option<u32>,
    pub format: Option<String>,
    pub track_count: Option<u32>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub position: Option<u32>,
    pub title: Option<String>,
    /// Milliseconds
    pub length: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelInfo {
    pub catalog_number: Option<String>,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub id: Option<String>,
    pub name: String,
}

/// `/release?query=...` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub releases: Vec<Release>,
    pub count: Option<u32>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_minimal_release() {
        let json = r#"{"id": "abc123", "title": "Test Album"}"#;

        let release: Release = serde_json::from_str(json).expect("Should parse minimal release");

        assert_eq!(release.id, "abc123");
        assert!(release.artist_credit.is_empty());
        assert!(release.media.is_empty());
        assert!(release.score.is_none());
    }

    #[test]
    fn test_parse_release_lookup() {
        let json = r#"{
            "id": "b1392450-e666-3926-a536-22c65f834433",
            "title": "OK Computer",
            "status": "Official",
            "date": "1997-05-21",
            "country": "GB",
            "artist-credit": [{
                "artist": {"id": "a74b1b7f", "name": "Radiohead", "sort-name": "Radiohead"},
                "name": "Radiohead",
                "joinphrase": ""
            }],
            "release-group": {
                "id": "rg-123",
                "title": "OK Computer",
                "primary-type": "Album",
                "first-release-date": "1997-05-21"
            },
            "media": [{
                "position": 1,
                "format": "CD",
                "track-count": 12,
                "tracks": [{"position": 1, "title": "Airbag", "length": 284000}]
            }],
            "genres": [{"name": "alternative rock", "count": 12}],
            "label-info": [{"catalog-number": "NODATA 02", "label": {"id": "l1", "name": "Parlophone"}}]
        }"#;

        let release: Release = serde_json::from_str(json).expect("Should parse release lookup");

        assert_eq!(release.artist_credit[0].artist.name, "Radiohead");
        assert_eq!(
            release.release_group.unwrap().primary_type.as_deref(),
            Some("Album")
        );
        assert_eq!(release.media[0].track_count, Some(12));
        assert_eq!(release.label_info[0].label.as_ref().unwrap().name, "Parlophone");
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "created": "2025-01-01T00:00:00.000Z",
            "count": 2,
            "offset": 0,
            "releases": [
                {"id": "r1", "score": 100, "title": "OK Computer"},
                {"id": "r2", "score": 87, "title": "OK Computer OKNOTOK"}
            ]
        }"#;

        let search: SearchResponse = serde_json::from_str(json).expect("Should parse search");
        assert_eq!(search.releases.len(), 2);
        assert_eq!(search.releases[0].score, Some(100));
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Not Found",
            "help": "For usage, please see: https://musicbrainz.org/doc/MusicBrainz_API"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Not Found");
        assert!(error.help.is_some());
    }
}
