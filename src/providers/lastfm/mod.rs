//! Last.fm integration
//!
//! Album info (listeners, play counts, tags) by MusicBrainz id or by name.

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_record;
pub use client::{DEFAULT_BASE_URL, LastfmClient};
