//! Trait definition for external metadata providers.
//!
//! The aggregation service only ever sees providers through [`AlbumProvider`],
//! so tests substitute fakes (see `test_utils`) while production wires in the
//! HTTP clients.

use async_trait::async_trait;

use crate::album::{AlbumRecord, Source};

/// Errors a provider call can fail with.
///
/// All of them are absorbed by the fetch coordinator: a failing provider
/// contributes nothing to the merge and never affects its siblings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Provider not configured: {0}")]
    Configuration(String),

    #[error("Provider task failed: {0}")]
    Task(String),
}

/// An external album metadata provider.
#[async_trait]
pub trait AlbumProvider: Send + Sync {
    /// Which source tag this provider answers for.
    fn source(&self) -> Source;

    /// Fetch an album by the provider's own id. `Ok(None)` means the provider
    /// does not know the id.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError>;

    /// Search by title and artist, returning the best (first) match.
    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError>;
}
