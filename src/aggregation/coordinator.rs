//! Fan-out of provider calls onto the worker pool, fan-in under a deadline.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::album::{AlbumIdentifiers, Source, SourceSet};
use crate::providers::{AlbumProvider, ProviderError};

use super::AggregationError;
use super::outcome::{FetchOutcome, FetchTask, Lookup, Outcome};
use super::pool::WorkerPool;

/// Configured provider clients keyed by source.
pub type ProviderRegistry = BTreeMap<Source, Arc<dyn AlbumProvider>>;

pub struct FetchCoordinator {
    pool: WorkerPool,
    providers: ProviderRegistry,
}

impl FetchCoordinator {
    pub fn new(pool: WorkerPool, providers: ProviderRegistry) -> Self {
        Self { pool, providers }
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// One task per requested, configured provider that has something to go on.
    ///
    /// A native id beats title/artist search.
    pub fn plan(&self, ids: &AlbumIdentifiers, sources: &SourceSet) -> Vec<FetchTask> {
        let mut tasks = Vec::new();

        for source in sources.providers() {
            let Some(provider) = self.providers.get(&source) else {
                tracing::info!(%source, "Provider requested but not configured, skipping");
                continue;
            };

            let lookup = source
                .native_id(ids)
                .map(|id| Lookup::ById(id.to_string()))
                .or_else(|| {
                    ids.title_artist().map(|(title, artist)| Lookup::Search {
                        title: title.to_string(),
                        artist: artist.to_string(),
                    })
                });

            match lookup {
                Some(lookup) => tasks.push(FetchTask::new(source, lookup, provider.clone())),
                None => tracing::debug!(%source, "No usable identifier for provider"),
            }
        }

        tasks
    }

    /// Run every task on the pool and collect outcomes.
    ///
    /// Without a timeout this waits for all tasks. With one, the whole
    /// collection shares a single deadline measured from dispatch; tasks still
    /// running then are aborted and reported as [`Outcome::TimedOut`].
    /// Outcomes are returned in source priority order.
    pub async fn fetch_all(
        &self,
        tasks: Vec<FetchTask>,
        timeout: Option<Duration>,
    ) -> Result<Vec<FetchOutcome>, AggregationError> {
        if self.pool.is_closed() {
            return Err(AggregationError::PoolClosed);
        }

        let start = Instant::now();
        let deadline = timeout.map(|t| start + t);
        let mut set = JoinSet::new();
        let mut pending = HashMap::new();

        for task in tasks {
            let pool = self.pool.clone();
            let source = task.source;
            let handle = set.spawn(async move {
                let started = Instant::now();
                let outcome = match pool.acquire().await {
                    Some(_permit) => task.execute().await,
                    None => Outcome::Failed(ProviderError::Task("worker pool closed".to_string())),
                };
                FetchOutcome {
                    provider: source,
                    outcome,
                    elapsed: started.elapsed(),
                }
            });
            pending.insert(handle.id(), source);
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        loop {
            let joined = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, set.join_next_with_id()).await {
                        Ok(joined) => joined,
                        Err(_) => break,
                    }
                }
                None => set.join_next_with_id().await,
            };
            let Some(joined) = joined else { break };

            let outcome = match joined {
                Ok((id, outcome)) => {
                    pending.remove(&id);
                    outcome
                }
                Err(e) => {
                    let Some(source) = pending.remove(&e.id()) else {
                        continue;
                    };
                    FetchOutcome {
                        provider: source,
                        outcome: Outcome::Failed(ProviderError::Task(e.to_string())),
                        elapsed: start.elapsed(),
                    }
                }
            };
            log_outcome(&outcome);
            outcomes.push(outcome);
        }

        if !pending.is_empty() {
            set.abort_all();
            for source in pending.into_values() {
                tracing::warn!(%source, "Provider did not answer before the deadline, abandoned");
                outcomes.push(FetchOutcome {
                    provider: source,
                    outcome: Outcome::TimedOut,
                    elapsed: start.elapsed(),
                });
            }
        }

        outcomes.sort_by_key(|o| o.provider);
        Ok(outcomes)
    }
}

fn log_outcome(outcome: &FetchOutcome) {
    let source = outcome.provider;
    let elapsed_ms = outcome.elapsed.as_millis() as u64;
    match &outcome.outcome {
        Outcome::Data(record) => {
            tracing::debug!(%source, elapsed_ms, keys = record.len(), "Provider returned data")
        }
        Outcome::Empty => tracing::debug!(%source, elapsed_ms, "Provider had no match"),
        Outcome::Failed(e) => tracing::warn!(%source, elapsed_ms, "Provider failed: {}", e),
        Outcome::TimedOut => tracing::warn!(%source, elapsed_ms, "Provider timed out"),
    }
}
