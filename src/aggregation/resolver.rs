//! Local catalog lookup strategy.

use std::sync::Arc;

use crate::album::{AlbumIdentifiers, AlbumRecord, Source, SourceSet};
use crate::store::{LocalStore, StoreError};

/// Result of the local phase of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalResolution {
    /// `db` was not requested; the store was not touched.
    Skipped,
    /// `db` was the only requested source. The record may be empty.
    Complete(AlbumRecord),
    /// Providers still need to be queried. The record may be empty.
    Partial(AlbumRecord),
}

/// Decides which local lookups to run and whether providers are needed.
pub struct IdentifierResolver {
    store: Arc<dyn LocalStore>,
}

impl IdentifierResolver {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Never fails: a store error makes that lookup a miss and the next
    /// strategy runs.
    pub async fn resolve(&self, ids: &AlbumIdentifiers, sources: &SourceSet) -> LocalResolution {
        if !sources.contains(Source::Db) {
            return LocalResolution::Skipped;
        }

        let record = self.lookup(ids).await.unwrap_or_default();
        tracing::debug!(found = !record.is_empty(), "Local lookup finished");

        if sources.is_local_only() {
            LocalResolution::Complete(record)
        } else {
            LocalResolution::Partial(record)
        }
    }

    /// Internal id first, then provider ids, then title/artist. First hit wins.
    async fn lookup(&self, ids: &AlbumIdentifiers) -> Option<AlbumRecord> {
        if let Some(db_id) = ids.db_id() {
            match self.store.find_by_id(db_id).await {
                Ok(Some(record)) if !record.is_empty() => return Some(record),
                Ok(_) => tracing::debug!(db_id, "No local album with this id"),
                Err(StoreError::InvalidId(_)) => {
                    tracing::debug!(db_id, "Malformed local id, treating as a miss")
                }
                Err(e) => tracing::warn!(db_id, "Local lookup by id failed: {}", e),
            }
        }

        let external = [
            (Source::Spotify, ids.spotify_id()),
            (Source::Musicbrainz, ids.mbid()),
            (Source::Discogs, ids.discogs_id()),
        ];
        for (source, native_id) in external {
            let Some(native_id) = native_id else { continue };
            match self.store.find_by_external_id(source, native_id).await {
                Ok(Some(record)) if !record.is_empty() => {
                    tracing::debug!(%source, native_id, "Local hit by provider id");
                    return Some(record);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(%source, native_id, "Local lookup by provider id failed: {}", e),
            }
        }

        let (title, artist) = ids.title_artist()?;
        match self.store.find_by_title_artist(title, artist).await {
            Ok(Some(record)) if !record.is_empty() => {
                tracing::debug!(title, artist, "Local hit by title/artist");
                Some(record)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(title, artist, "Local title/artist lookup failed: {}", e);
                None
            }
        }
    }
}
