//! Sparse album record shared by the local store, every provider adapter and
//! the merger.
//!
//! Provider payloads are typed DTOs up to the adapter boundary. Past that point
//! they are all flattened into an [`AlbumRecord`], a key/value map whose keys
//! are the well-known names in [`keys`]. Values stay JSON so provider-specific
//! extras (marketplace stats, play counts) survive without a unified schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known record keys.
pub mod keys {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const ARTIST: &str = "artist";
    pub const DATE_RELEASE: &str = "date_release";
    pub const YEAR: &str = "year";
    pub const GENRE: &str = "genre";
    pub const SUBGENRES: &str = "subgenres";
    pub const STYLES: &str = "styles";
    pub const IMAGE: &str = "image";
    pub const TRACKS: &str = "tracks";
    pub const TRACKLIST: &str = "tracklist";
    pub const DURATION: &str = "duration";
    pub const FORMATS: &str = "formats";
    pub const LABEL: &str = "label";
    pub const COUNTRY: &str = "country";
    pub const STATUS: &str = "status";
    pub const RELEASE_TYPE: &str = "release_type";
    pub const RATING: &str = "rating";
    pub const MARKETPLACE: &str = "marketplace";
    pub const LISTENERS: &str = "listeners";
    pub const PLAYCOUNT: &str = "playcount";
    pub const SPOTIFY_ID: &str = "spotify_id";
    pub const SPOTIFY_LINK: &str = "spotify_link";
    pub const DISCOGS_ID: &str = "discogs_id";
    pub const MBID: &str = "mbid";
    pub const LASTFM_LINK: &str = "lastfm_link";
}

/// One source's view of an album, or the merged canonical album.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumRecord(Map<String, Value>);

/// Whether a value counts as "missing" for fill-missing merges:
/// null, empty string, empty list or empty map.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl AlbumRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a key, if it holds a non-empty string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value unconditionally, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Builder-style insert used by the adapters. Empty values are skipped so
    /// normalized records stay sparse.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !is_empty_value(&value) {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Copy every key of `other` whose slot here is absent or empty.
    ///
    /// Present, non-empty values are never replaced. Returns how many keys
    /// were filled.
    pub fn fill_missing(&mut self, other: &AlbumRecord) -> usize {
        let mut filled = 0;
        for (key, value) in &other.0 {
            let missing = self.0.get(key).is_none_or(is_empty_value);
            if missing {
                self.0.insert(key.clone(), value.clone());
                filled += 1;
            }
        }
        filled
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AlbumRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for AlbumRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
