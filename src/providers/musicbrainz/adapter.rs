//! Adapter layer: Convert MusicBrainz DTOs to album records
//!
//! This is the ONLY place where MusicBrainz DTO types are converted to domain
//! types. If MusicBrainz changes their response format, only this file and
//! dto.rs need to change.

use super::dto;
use crate::album::{AlbumRecord, keys};
use crate::providers::http::{format_release_date, millis_to_minutes};

pub fn to_record(release: dto::Release) -> AlbumRecord {
    let artist = build_artist_string(&release.artist_credit);
    let genre = extract_genres(&release.genres);

    let track_count: u32 = release
        .media
        .iter()
        .map(|m| m.track_count.unwrap_or(m.tracks.len() as u32))
        .sum();
    let total_ms: u64 = release
        .media
        .iter()
        .flat_map(|m| m.tracks.iter())
        .filter_map(|t| t.length)
        .sum();

    let (release_type, date) = match release.release_group {
        Some(rg) => (rg.primary_type, release.date.or(rg.first_release_date)),
        None => (None, release.date),
    };

    let label = release
        .label_info
        .into_iter()
        .find_map(|info| info.label)
        .map(|label| label.name);

    AlbumRecord::new()
        .with(keys::MBID, release.id)
        .with(keys::TITLE, release.title)
        .with(keys::ARTIST, artist)
        .with(keys::DATE_RELEASE, date.as_deref().and_then(format_release_date))
        .with(keys::COUNTRY, release.country)
        .with(keys::STATUS, release.status)
        .with(keys::RELEASE_TYPE, release_type)
        .with(keys::GENRE, genre)
        .with(keys::TRACKS, (track_count > 0).then_some(track_count))
        .with(keys::DURATION, (total_ms > 0).then(|| millis_to_minutes(total_ms)))
        .with(keys::LABEL, label)
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    if credits.is_empty() {
        return None;
    }

    let mut result = String::new();
    for credit in credits {
        // Use credited name if available, otherwise official name
        let name = credit.name.as_ref().unwrap_or(&credit.artist.name);
        result.push_str(name);

        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    Some(result)
}

/// Genres sorted by vote count, top 5, capitalized for display
fn extract_genres(genres: &[dto::Genre]) -> Vec<String> {
    let mut sorted: Vec<_> = genres.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    sorted
        .into_iter()
        .take(5)
        .map(|g| {
            g.name
                .split_whitespace()
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
