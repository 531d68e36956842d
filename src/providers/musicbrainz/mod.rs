//! MusicBrainz API integration
//!
//! Release lookup by MBID and release search by title/artist.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_record;
pub use client::{DEFAULT_BASE_URL, MusicBrainzClient};
