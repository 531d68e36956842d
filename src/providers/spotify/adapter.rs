//! Adapter layer: Convert Spotify DTOs to album records

use super::dto;
use crate::album::{AlbumRecord, keys};
use crate::providers::http::{format_release_date, millis_to_minutes};

/// Spotify serves covers at 640, 300 and 64 px; the catalog keeps the 640 one.
const COVER_HEIGHT: u32 = 640;

pub fn to_record(album: dto::Album) -> AlbumRecord {
    let artist = album
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let image = album
        .images
        .iter()
        .find(|img| img.height == Some(COVER_HEIGHT))
        .or_else(|| album.images.first())
        .map(|img| img.url.clone());

    // Only full album objects carry tracks; search hits leave duration unset
    let duration = album.tracks.as_ref().and_then(|tracks| {
        let total_ms: u64 = tracks.items.iter().map(|t| t.duration_ms).sum();
        (total_ms > 0).then(|| millis_to_minutes(total_ms))
    });

    AlbumRecord::new()
        .with(keys::SPOTIFY_ID, album.id)
        .with(keys::TITLE, album.name)
        .with(keys::ARTIST, artist)
        .with(
            keys::DATE_RELEASE,
            album.release_date.as_deref().and_then(format_release_date),
        )
        .with(keys::GENRE, album.genres)
        .with(keys::IMAGE, image)
        .with(keys::SPOTIFY_LINK, album.external_urls.spotify)
        .with(keys::TRACKS, album.total_tracks)
        .with(keys::DURATION, duration)
        .with(keys::LABEL, album.label)
        .with(keys::RELEASE_TYPE, album.album_type)
}
