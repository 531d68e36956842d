//! Album aggregation: local lookup, parallel provider fetch, merge.
//!
//! - [`IdentifierResolver`]: local catalog strategy
//! - [`FetchCoordinator`]: bounded fan-out to providers under a deadline
//! - [`merger`]: priority fill-missing merge and the final local fallback
//! - [`AggregationService`]: the entry point callers use

mod coordinator;
pub mod merger;
mod outcome;
mod pool;
mod resolver;
mod service;

pub use coordinator::{FetchCoordinator, ProviderRegistry};
pub use outcome::{FetchOutcome, FetchTask, Lookup, Outcome, records};
pub use pool::WorkerPool;
pub use resolver::{IdentifierResolver, LocalResolution};
pub use service::{AggregationService, AggregationServiceBuilder, Resolution};

use crate::album::InvalidIdentifiers;

/// Errors that end a request early. [`AggregationService::resolve`] turns
/// unusable identifiers into the empty album and everything else into
/// [`Resolution::Error`].
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error(transparent)]
    InvalidIdentifiers(#[from] InvalidIdentifiers),

    #[error("Worker pool is shut down")]
    PoolClosed,
}
