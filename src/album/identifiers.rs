//! The bag of partial identifiers a caller resolves an album from.

use serde::{Deserialize, Serialize};

/// Partial identifying information for one album.
///
/// Blank strings are treated the same as absent values by every accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumIdentifiers {
    /// Local catalog id
    pub db_id: Option<String>,
    /// Spotify album id
    pub spotify_id: Option<String>,
    /// MusicBrainz release id (also understood by Last.fm)
    pub mbid: Option<String>,
    /// Discogs release id
    pub discogs_id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Why an identifier bag cannot be used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIdentifiers {
    #[error("Provide at least one id (db_id, spotify_id, mbid, discogs_id) or both title and artist")]
    Empty,

    #[error("title and artist must be given together")]
    UnpairedTitleArtist,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl AlbumIdentifiers {
    /// Identifiers for a free-text title/artist search.
    pub fn by_title_artist(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            artist: Some(artist.into()),
            ..Default::default()
        }
    }

    pub fn db_id(&self) -> Option<&str> {
        present(&self.db_id)
    }

    pub fn spotify_id(&self) -> Option<&str> {
        present(&self.spotify_id)
    }

    pub fn mbid(&self) -> Option<&str> {
        present(&self.mbid)
    }

    pub fn discogs_id(&self) -> Option<&str> {
        present(&self.discogs_id)
    }

    /// Title and artist, only when both are present.
    pub fn title_artist(&self) -> Option<(&str, &str)> {
        match (present(&self.title), present(&self.artist)) {
            (Some(title), Some(artist)) => Some((title, artist)),
            _ => None,
        }
    }

    /// Check the lookup-key invariants: at least one usable key, and title
    /// and artist either both present or both absent.
    pub fn validate(&self) -> Result<(), InvalidIdentifiers> {
        let has_title = present(&self.title).is_some();
        let has_artist = present(&self.artist).is_some();
        if has_title != has_artist {
            return Err(InvalidIdentifiers::UnpairedTitleArtist);
        }

        let has_id = self.db_id().is_some()
            || self.spotify_id().is_some()
            || self.mbid().is_some()
            || self.discogs_id().is_some();
        if !has_id && !has_title {
            return Err(InvalidIdentifiers::Empty);
        }
        Ok(())
    }
}
