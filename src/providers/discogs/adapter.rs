//! Adapter layer: Convert Discogs DTOs to album records
//!
//! Full releases and search hits are different shapes; both end up in the
//! same sparse record.

use serde_json::json;

use super::dto;
use crate::album::{AlbumRecord, keys};

/// Convert a full release
pub fn release_to_record(release: dto::Release) -> AlbumRecord {
    let artist = release
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let image = release
        .images
        .iter()
        .find(|img| img.image_type.as_deref() == Some("primary"))
        .or_else(|| release.images.first())
        .map(|img| img.uri.clone());

    let tracklist: Vec<String> = release.tracklist.into_iter().map(|t| t.title).collect();
    let formats: Vec<String> = release.formats.into_iter().map(|f| f.name).collect();
    let label = release.labels.first().map(|l| l.name.clone());

    let (have, want, rating) = match release.community {
        Some(community) => (
            community.have,
            community.want,
            community.rating.and_then(|r| r.average),
        ),
        None => (None, None, None),
    };

    let marketplace = if release.lowest_price.is_some() || have.is_some() || want.is_some() {
        json!({
            "min_price": release.lowest_price,
            "have": have,
            "want": want,
        })
    } else {
        serde_json::Value::Null
    };

    AlbumRecord::new()
        .with(keys::DISCOGS_ID, release.id.to_string())
        .with(keys::TITLE, release.title)
        .with(keys::ARTIST, artist)
        .with(keys::YEAR, release.year.filter(|y| *y > 0))
        .with(keys::COUNTRY, release.country)
        .with(keys::GENRE, release.genres)
        .with(keys::STYLES, release.styles)
        .with(keys::IMAGE, image)
        .with(keys::TRACKLIST, tracklist)
        .with(keys::FORMATS, formats)
        .with(keys::LABEL, label)
        .with(keys::RATING, rating)
        .with(keys::MARKETPLACE, marketplace)
}

/// Convert a search hit
pub fn search_result_to_record(result: dto::SearchResult) -> AlbumRecord {
    let (artist, title) = split_search_title(&result.title);
    let year = result
        .year
        .as_deref()
        .and_then(|y| y.trim().parse::<i32>().ok())
        .filter(|y| *y > 0);

    AlbumRecord::new()
        .with(keys::DISCOGS_ID, result.id.to_string())
        .with(keys::TITLE, title)
        .with(keys::ARTIST, artist)
        .with(keys::YEAR, year)
        .with(keys::COUNTRY, result.country)
        .with(keys::GENRE, result.genre)
        .with(keys::STYLES, result.style)
        .with(keys::FORMATS, result.format)
        .with(keys::LABEL, result.label.into_iter().next())
        .with(keys::IMAGE, result.cover_image)
}

/// Split a search title of the form "Artist - Title".
///
/// Titles without the separator are returned whole with no artist.
fn split_search_title(raw: &str) -> (Option<String>, String) {
    match raw.split_once(" - ") {
        Some((artist, title)) => (Some(artist.trim().to_string()), title.trim().to_string()),
        None => (None, raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_search_title() {
        assert_eq!(
            split_search_title("Radiohead - OK Computer"),
            (Some("Radiohead".to_string()), "OK Computer".to_string())
        );
        // Only the first separator splits
        assert_eq!(
            split_search_title("Sigur Rós - ( ) - Remastered"),
            (Some("Sigur Rós".to_string()), "( ) - Remastered".to_string())
        );
        assert_eq!(split_search_title("Untitled"), (None, "Untitled".to_string()));
    }

    #[test]
    fn test_release_prefers_primary_image_and_drops_zero_year() {
        let release = dto::Release {
            id: 42,
            title: "Amnesiac".to_string(),
            artists: vec![dto::Artist {
                id: None,
                name: "Radiohead".to_string(),
            }],
            year: Some(0),
            country: None,
            genres: vec!["Rock".to_string()],
            styles: vec![],
            images: vec![
                dto::Image {
                    image_type: Some("secondary".to_string()),
                    uri: "https://img/back".to_string(),
                },
                dto::Image {
                    image_type: Some("primary".to_string()),
                    uri: "https://img/front".to_string(),
                },
            ],
            tracklist: vec![],
            formats: vec![],
            labels: vec![],
            community: None,
            lowest_price: None,
            uri: None,
        };

        let record = release_to_record(release);

        assert_eq!(record.get_str(keys::DISCOGS_ID), Some("42"));
        assert_eq!(record.get_str(keys::IMAGE), Some("https://img/front"));
        assert!(!record.contains_key(keys::YEAR));
        assert!(!record.contains_key(keys::MARKETPLACE));
        assert_eq!(record.get(keys::GENRE), Some(&json!(["Rock"])));
    }

    #[test]
    fn test_search_result_conversion() {
        let result = dto::SearchResult {
            id: 830227,
            title: "Radiohead - OK Computer".to_string(),
            year: Some("1997".to_string()),
            country: Some("UK".to_string()),
            genre: vec!["Rock".to_string()],
            style: vec![],
            format: vec!["CD".to_string()],
            label: vec!["Parlophone".to_string(), "Capitol".to_string()],
            cover_image: Some("https://img/cover".to_string()),
            community: None,
        };

        let record = search_result_to_record(result);

        assert_eq!(record.get_str(keys::TITLE), Some("OK Computer"));
        assert_eq!(record.get_str(keys::ARTIST), Some("Radiohead"));
        assert_eq!(record.get(keys::YEAR), Some(&json!(1997)));
        assert_eq!(record.get_str(keys::LABEL), Some("Parlophone"));
    }
}
