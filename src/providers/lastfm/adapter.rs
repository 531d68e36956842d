//! Adapter layer: Convert Last.fm DTOs to album records

use chrono::NaiveDate;

use super::dto;
use crate::album::{AlbumRecord, keys};

pub fn to_record(album: dto::AlbumInfo) -> AlbumRecord {
    let tracks = album.tracks.map(|t| t.track.into_vec()).unwrap_or_default();
    let track_count = tracks.len();
    let duration_secs: u64 = tracks
        .iter()
        .filter_map(|t| t.duration.as_ref().and_then(dto::Count::value))
        .sum();

    let (genre, subgenres) = split_genres(album.tags.map(dto::TagField::into_tags).unwrap_or_default());

    let image = album
        .image
        .iter()
        .find(|img| img.size == "extralarge")
        .map(|img| img.url.clone());

    AlbumRecord::new()
        .with(keys::MBID, album.mbid)
        .with(keys::TITLE, album.name)
        .with(keys::ARTIST, album.artist)
        .with(
            keys::DATE_RELEASE,
            album.releasedate.as_deref().and_then(format_lastfm_date),
        )
        .with(keys::GENRE, genre)
        .with(keys::SUBGENRES, subgenres)
        .with(keys::IMAGE, image)
        .with(keys::LASTFM_LINK, album.url)
        .with(keys::LISTENERS, album.listeners.as_ref().and_then(dto::Count::value))
        .with(keys::PLAYCOUNT, album.playcount.as_ref().and_then(dto::Count::value))
        .with(keys::TRACKS, (track_count > 0).then_some(track_count))
        .with(keys::DURATION, (duration_secs > 0).then(|| (duration_secs + 30) / 60))
}

/// The first meaningful tag is the genre, the rest are subgenres.
/// Purely numeric tags ("1997", "10") are year/rating noise and are skipped.
fn split_genres(tags: Vec<dto::Tag>) -> (Vec<String>, Vec<String>) {
    let mut names = tags
        .into_iter()
        .map(|t| t.name)
        .filter(|name| !name.is_empty() && !name.chars().all(|c| c.is_ascii_digit()));

    match names.next() {
        Some(first) => (vec![first], names.collect()),
        None => (Vec::new(), Vec::new()),
    }
}

/// Normalize Last.fm release dates such as `"6 Apr 1999, 00:00"`.
///
/// Day-precision dates become `DD/MM/YYYY`; a bare year stays as is.
fn format_lastfm_date(raw: &str) -> Option<String> {
    let date = raw.split(',').next().unwrap_or_default().trim();
    if date.len() < 4 {
        return None;
    }
    if date.len() == 4 {
        return Some(date.to_string());
    }

    for format in ["%d %b %Y", "%Y-%m-%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, format) {
            return Some(parsed.format("%d/%m/%Y").to_string());
        }
    }

    date.split(' ').next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag(name: &str) -> dto::Tag {
        dto::Tag {
            name: name.to_string(),
            url: None,
        }
    }

    #[test]
    fn test_split_genres_skips_numeric_tags() {
        let (genre, subgenres) = split_genres(vec![
            tag("1997"),
            tag("alternative"),
            tag("rock"),
            tag("90s"),
        ]);

        assert_eq!(genre, vec!["alternative"]);
        assert_eq!(subgenres, vec!["rock", "90s"]);
    }

    #[test]
    fn test_split_genres_empty() {
        let (genre, subgenres) = split_genres(vec![tag("2000")]);
        assert!(genre.is_empty());
        assert!(subgenres.is_empty());
    }

    #[test]
    fn test_format_lastfm_date() {
        assert_eq!(format_lastfm_date("6 Apr 1999, 00:00").as_deref(), Some("06/04/1999"));
        assert_eq!(format_lastfm_date("1997-05-21").as_deref(), Some("21/05/1997"));
        assert_eq!(format_lastfm_date("1997").as_deref(), Some("1997"));
        assert_eq!(format_lastfm_date("  "), None);
    }

    #[test]
    fn test_convert_album_info() {
        let info: dto::AlbumInfo = serde_json::from_value(json!({
            "name": "OK Computer",
            "artist": "Radiohead",
            "mbid": "",
            "url": "https://www.last.fm/music/Radiohead/OK+Computer",
            "image": [{"#text": "https://img/xl.png", "size": "extralarge"}],
            "listeners": "100",
            "playcount": "2500",
            "tracks": {"track": [
                {"name": "Airbag", "duration": 284},
                {"name": "Paranoid Android", "duration": 383}
            ]},
            "tags": {"tag": [{"name": "alternative"}, {"name": "rock"}]}
        }))
        .unwrap();

        let record = to_record(info);

        assert_eq!(record.get_str(keys::TITLE), Some("OK Computer"));
        assert_eq!(record.get(keys::GENRE), Some(&json!(["alternative"])));
        assert_eq!(record.get(keys::SUBGENRES), Some(&json!(["rock"])));
        assert_eq!(record.get(keys::LISTENERS), Some(&json!(100)));
        assert_eq!(record.get(keys::TRACKS), Some(&json!(2)));
        // 667 seconds rounds to 11 minutes
        assert_eq!(record.get(keys::DURATION), Some(&json!(11)));
        // Blank mbid is not carried
        assert!(!record.contains_key(keys::MBID));
    }
}
