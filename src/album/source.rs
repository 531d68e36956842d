//! Source tags and the ordered source set a request is restricted to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::identifiers::AlbumIdentifiers;

/// A place album data can come from.
///
/// Declaration order is merge priority: earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The local catalog
    Db,
    Spotify,
    Discogs,
    Lastfm,
    Musicbrainz,
}

impl Source {
    /// Every source in priority order.
    pub const ALL: [Source; 5] = [
        Source::Db,
        Source::Spotify,
        Source::Discogs,
        Source::Lastfm,
        Source::Musicbrainz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Db => "db",
            Source::Spotify => "spotify",
            Source::Discogs => "discogs",
            Source::Lastfm => "lastfm",
            Source::Musicbrainz => "musicbrainz",
        }
    }

    /// External providers are everything except the local catalog.
    pub fn is_provider(&self) -> bool {
        !matches!(self, Source::Db)
    }

    /// The identifier this source can fetch by directly, if the caller
    /// supplied one. Last.fm and MusicBrainz share the MusicBrainz id.
    pub fn native_id<'a>(&self, ids: &'a AlbumIdentifiers) -> Option<&'a str> {
        match self {
            Source::Db => ids.db_id(),
            Source::Spotify => ids.spotify_id(),
            Source::Discogs => ids.discogs_id(),
            Source::Lastfm | Source::Musicbrainz => ids.mbid(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized source tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown source: {0}")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "db" => Ok(Source::Db),
            "spotify" => Ok(Source::Spotify),
            "discogs" => Ok(Source::Discogs),
            "lastfm" => Ok(Source::Lastfm),
            "musicbrainz" => Ok(Source::Musicbrainz),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}

/// Ordered, de-duplicated set of sources a request may consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet(Vec<Source>);

impl SourceSet {
    /// Parse caller-supplied tags. Unrecognized tags are dropped silently and
    /// duplicates keep their first position. An empty input means "all".
    pub fn parse<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sources = Vec::new();
        let mut saw_any = false;
        for tag in tags {
            saw_any = true;
            match tag.as_ref().parse::<Source>() {
                Ok(source) if !sources.contains(&source) => sources.push(source),
                Ok(_) => {}
                Err(e) => tracing::debug!("Ignoring source tag: {}", e),
            }
        }
        if !saw_any {
            return Self::default();
        }
        Self(sources)
    }

    pub fn only(source: Source) -> Self {
        Self(vec![source])
    }

    pub fn contains(&self, source: Source) -> bool {
        self.0.contains(&source)
    }

    /// True when the local catalog is the only requested source.
    pub fn is_local_only(&self) -> bool {
        self.0 == [Source::Db]
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Source> + '_ {
        self.0.iter().copied()
    }

    /// Requested external providers, in the order they were given.
    pub fn providers(&self) -> impl Iterator<Item = Source> + '_ {
        self.iter().filter(Source::is_provider)
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self(Source::ALL.to_vec())
    }
}

impl FromStr for SourceSet {
    type Err = std::convert::Infallible;

    /// Comma-separated tags, e.g. `db,spotify`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(
            s.split(',').map(str::trim).filter(|t| !t.is_empty()),
        ))
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.0.iter().map(Source::as_str).collect();
        f.write_str(&tags.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_in_priority_order() {
        let set = SourceSet::default();
        assert_eq!(set.iter().collect::<Vec<_>>(), Source::ALL.to_vec());
    }

    #[test]
    fn test_parse_drops_unknown_and_duplicates() {
        let set = SourceSet::parse(["Spotify", "tidal", "db", "spotify", "LASTFM"]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Source::Spotify, Source::Db, Source::Lastfm]
        );
    }

    #[test]
    fn test_parse_empty_means_all() {
        let set = SourceSet::parse(Vec::<String>::new());
        assert_eq!(set, SourceSet::default());
    }

    #[test]
    fn test_parse_only_unknown_is_empty() {
        let set = SourceSet::parse(["napster"]);
        assert!(set.is_empty());
        assert!(!set.is_local_only());
    }

    #[test]
    fn test_local_only() {
        assert!(SourceSet::parse(["db"]).is_local_only());
        assert!(SourceSet::parse(["db", "db"]).is_local_only());
        assert!(!SourceSet::parse(["db", "spotify"]).is_local_only());
    }

    #[test]
    fn test_providers_excludes_db() {
        let set: SourceSet = "db, discogs,musicbrainz".parse().unwrap();
        assert_eq!(
            set.providers().collect::<Vec<_>>(),
            vec![Source::Discogs, Source::Musicbrainz]
        );
        assert_eq!(set.to_string(), "db,discogs,musicbrainz");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Source::Db < Source::Spotify);
        assert!(Source::Spotify < Source::Discogs);
        assert!(Source::Discogs < Source::Lastfm);
        assert!(Source::Lastfm < Source::Musicbrainz);
    }

    #[test]
    fn test_native_id_mapping() {
        let ids = AlbumIdentifiers {
            spotify_id: Some("sp".into()),
            mbid: Some("mb".into()),
            ..Default::default()
        };
        assert_eq!(Source::Spotify.native_id(&ids), Some("sp"));
        assert_eq!(Source::Lastfm.native_id(&ids), Some("mb"));
        assert_eq!(Source::Musicbrainz.native_id(&ids), Some("mb"));
        assert_eq!(Source::Discogs.native_id(&ids), None);
    }
}
