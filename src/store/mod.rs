//! Local album catalog.
//!
//! The aggregation service reads the catalog through [`LocalStore`] only.
//! [`SqliteStore`] is the production backend; tests use the in-memory fake
//! from `test_utils`.

mod sqlite;

use async_trait::async_trait;

use crate::album::{AlbumRecord, Source};

pub use sqlite::{DEFAULT_DB_NAME, SqliteStore};

/// Errors from the local catalog.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The id is not a valid local identifier. Callers treat this as a miss.
    #[error("Invalid local id: {0:?}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to encode album document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid album document: {0}")]
    InvalidDocument(String),
}

/// Read access to the local album catalog.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Look up by internal id. Malformed ids return [`StoreError::InvalidId`].
    async fn find_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, StoreError>;

    /// Look up by a provider's native id (`Lastfm` shares the MusicBrainz id).
    async fn find_by_external_id(
        &self,
        source: Source,
        native_id: &str,
    ) -> Result<Option<AlbumRecord>, StoreError>;

    /// Case-insensitive substring match on both title and artist, first by id.
    async fn find_by_title_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, StoreError>;
}
