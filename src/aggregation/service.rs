//! Public entry point: resolve identifiers into one canonical album.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::album::{AlbumIdentifiers, AlbumRecord, SourceSet};
use crate::providers::AlbumProvider;
use crate::store::LocalStore;

use super::AggregationError;
use super::coordinator::{FetchCoordinator, ProviderRegistry};
use super::merger;
use super::outcome;
use super::pool::WorkerPool;
use super::resolver::{IdentifierResolver, LocalResolution};

/// What `resolve` hands back: the album (empty when nothing matched) or an
/// error message. Serializes as the bare album object or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    Error { error: String },
    Album(AlbumRecord),
}

impl Resolution {
    pub fn album(&self) -> Option<&AlbumRecord> {
        match self {
            Resolution::Album(record) => Some(record),
            Resolution::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resolution::Error { error } => Some(error),
            Resolution::Album(_) => None,
        }
    }

    /// An empty album: no source knew anything.
    pub fn is_not_found(&self) -> bool {
        self.album().is_some_and(AlbumRecord::is_empty)
    }
}

/// Resolves albums against the local catalog and the configured providers.
///
/// The worker pool lives as long as the service and is shared by all
/// requests; call [`AggregationService::shutdown`] to close it.
pub struct AggregationService {
    store: Arc<dyn LocalStore>,
    resolver: IdentifierResolver,
    coordinator: FetchCoordinator,
    default_sources: SourceSet,
    default_timeout: Option<Duration>,
}

impl AggregationService {
    pub fn builder(store: Arc<dyn LocalStore>) -> AggregationServiceBuilder {
        AggregationServiceBuilder {
            store,
            providers: ProviderRegistry::new(),
            max_concurrency: WorkerPool::DEFAULT_SIZE,
            default_sources: SourceSet::default(),
            default_timeout: None,
        }
    }

    /// Resolve an album. Never panics and never returns an error type:
    /// failures come back as [`Resolution::Error`]. Identifiers with no usable
    /// lookup key resolve to the empty album without touching any source.
    ///
    /// `sources` and `timeout` fall back to the service defaults when `None`.
    pub async fn resolve(
        &self,
        ids: &AlbumIdentifiers,
        sources: Option<&SourceSet>,
        timeout: Option<Duration>,
    ) -> Resolution {
        let attempt = AssertUnwindSafe(self.try_resolve(ids, sources, timeout))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(album)) => Resolution::Album(album),
            Ok(Err(AggregationError::InvalidIdentifiers(e))) => {
                tracing::info!("Nothing to look up: {}", e);
                Resolution::Album(AlbumRecord::new())
            }
            Ok(Err(e)) => {
                tracing::error!("Album resolution failed: {}", e);
                Resolution::Error {
                    error: e.to_string(),
                }
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("Album resolution panicked: {}", message);
                Resolution::Error {
                    error: format!("Unexpected error: {}", message),
                }
            }
        }
    }

    async fn try_resolve(
        &self,
        ids: &AlbumIdentifiers,
        sources: Option<&SourceSet>,
        timeout: Option<Duration>,
    ) -> Result<AlbumRecord, AggregationError> {
        ids.validate()?;
        if self.coordinator.pool().is_closed() {
            return Err(AggregationError::PoolClosed);
        }

        let sources = sources.unwrap_or(&self.default_sources);
        let timeout = timeout.or(self.default_timeout);
        tracing::info!(sources = %sources, ?timeout, "Resolving album");

        let local = match self.resolver.resolve(ids, sources).await {
            LocalResolution::Complete(record) => return Ok(record),
            LocalResolution::Partial(record) => Some(record),
            LocalResolution::Skipped => None,
        };

        let tasks = self.coordinator.plan(ids, sources);
        let outcomes = if tasks.is_empty() {
            Vec::new()
        } else {
            self.coordinator.fetch_all(tasks, timeout).await?
        };

        let merged = merger::merge(local, &outcome::records(outcomes));
        let album = merger::local_fallback(self.store.as_ref(), ids, sources, merged).await;

        tracing::info!(keys = album.len(), "Album resolved");
        Ok(album)
    }

    /// Close the worker pool. Later requests resolve to an error.
    pub fn shutdown(&self) {
        tracing::debug!("Shutting down aggregation worker pool");
        self.coordinator.pool().close();
    }

    pub fn is_shut_down(&self) -> bool {
        self.coordinator.pool().is_closed()
    }
}

pub struct AggregationServiceBuilder {
    store: Arc<dyn LocalStore>,
    providers: ProviderRegistry,
    max_concurrency: usize,
    default_sources: SourceSet,
    default_timeout: Option<Duration>,
}

impl AggregationServiceBuilder {
    /// Register a provider client under its own source tag, replacing any
    /// earlier client for the same tag.
    pub fn with_provider(mut self, provider: Arc<dyn AlbumProvider>) -> Self {
        self.providers.insert(provider.source(), provider);
        self
    }

    pub fn with_providers(self, providers: impl IntoIterator<Item = Arc<dyn AlbumProvider>>) -> Self {
        providers.into_iter().fold(self, Self::with_provider)
    }

    pub fn max_concurrency(mut self, size: usize) -> Self {
        self.max_concurrency = size;
        self
    }

    pub fn default_sources(mut self, sources: SourceSet) -> Self {
        self.default_sources = sources;
        self
    }

    pub fn default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn build(self) -> AggregationService {
        let pool = WorkerPool::new(self.max_concurrency);
        tracing::debug!(
            workers = pool.size(),
            providers = self.providers.len(),
            "Aggregation service ready"
        );

        AggregationService {
            resolver: IdentifierResolver::new(self.store.clone()),
            coordinator: FetchCoordinator::new(pool, self.providers),
            store: self.store,
            default_sources: self.default_sources,
            default_timeout: self.default_timeout,
        }
    }
}
