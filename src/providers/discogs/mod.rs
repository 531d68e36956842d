//! Discogs database integration
//!
//! Release lookup by Discogs id and release search by title/artist.

pub mod dto;
mod adapter;
mod client;

pub use adapter::{release_to_record, search_result_to_record};
pub use client::{DEFAULT_BASE_URL, DiscogsClient};
