//! Spotify Web API integration
//!
//! Album lookup by Spotify id and album search by title/artist.

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_record;
pub use client::{DEFAULT_BASE_URL, SpotifyClient};
