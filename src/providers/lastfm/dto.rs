//! Last.fm API Data Transfer Objects
//!
//! Last.fm's JSON is a mechanical translation of its XML API, so the shapes
//! are loose: counts arrive as strings, single-element lists collapse into a
//! bare object and an album without tags has `"tags": ""`. The untagged enums
//! below absorb those quirks so the adapter sees one shape.
//!
//! API Reference: https://www.last.fm/api/show/album.getInfo

use serde::{Deserialize, Serialize};

/// `album.getInfo` response. Errors come back with HTTP 200 and an
/// `error`/`message` pair instead of `album`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumInfoResponse {
    pub album: Option<AlbumInfo>,
    pub error: Option<u32>,
    pub message: Option<String>,
}

/// Last.fm error code for "the requested resource does not exist"
pub const ERROR_NOT_FOUND: u32 = 6;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumInfo {
    pub name: String,
    pub artist: String,
    pub mbid: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub image: Vec<Image>,
    pub listeners: Option<Count>,
    pub playcount: Option<Count>,
    pub tracks: Option<Tracks>,
    pub tags: Option<TagField>,
    pub releasedate: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    #[serde(rename = "#text")]
    pub url: String,
    /// small, medium, large, extralarge, mega
    pub size: String,
}

/// A number that may be encoded as a JSON string
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Count {
    Number(u64),
    Text(String),
}

impl Count {
    pub fn value(&self) -> Option<u64> {
        match self {
            Count::Number(n) => Some(*n),
            Count::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A list that collapses to a bare object when it has one element
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tracks {
    #[serde(default)]
    pub track: OneOrMany<Track>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub name: String,
    /// Seconds
    pub duration: Option<Count>,
}

/// `{"tag": [...]}`, or an empty string when the album has no tags
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TagField {
    Tags {
        #[serde(default)]
        tag: OneOrMany<Tag>,
    },
    Blank(String),
}

impl TagField {
    pub fn into_tags(self) -> Vec<Tag> {
        match self {
            TagField::Tags { tag } => tag.into_vec(),
            TagField::Blank(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    pub url: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
