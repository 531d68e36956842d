//! Folding the local record and provider records into one album.
//!
//! Priority is `local > spotify > discogs > lastfm > musicbrainz`: for every
//! key the value comes from the highest-priority source that has a non-empty
//! value for it.

use std::collections::BTreeMap;

use crate::album::{AlbumIdentifiers, AlbumRecord, Source, SourceSet};
use crate::store::LocalStore;

/// Merge by fill-missing in priority order. Pure; never touches the store.
pub fn merge(
    local: Option<AlbumRecord>,
    provider_records: &BTreeMap<Source, AlbumRecord>,
) -> AlbumRecord {
    let mut merged = AlbumRecord::new();

    let ordered = local
        .iter()
        .chain(provider_records.values())
        .filter(|record| !record.is_empty());

    for record in ordered {
        merged.fill_missing(record);
    }

    merged
}

/// Last resort when nothing matched: one more local title/artist lookup.
///
/// Only runs when the local catalog was requested. A store error leaves the
/// merged record as it was.
pub async fn local_fallback(
    store: &dyn LocalStore,
    ids: &AlbumIdentifiers,
    sources: &SourceSet,
    merged: AlbumRecord,
) -> AlbumRecord {
    if !merged.is_empty() || !sources.contains(Source::Db) {
        return merged;
    }

    let Some((title, artist)) = ids.title_artist() else {
        return merged;
    };

    match store.find_by_title_artist(title, artist).await {
        Ok(Some(record)) => {
            tracing::debug!(title, artist, "Nothing merged, using local title/artist match");
            record
        }
        Ok(None) => merged,
        Err(e) => {
            tracing::warn!(title, artist, "Local fallback lookup failed: {}", e);
            merged
        }
    }
}
