//! Provider fetch tasks and their outcomes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::album::{AlbumRecord, Source};
use crate::providers::{AlbumProvider, ProviderError};

/// How a provider is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fetch by the provider's native id
    ById(String),
    /// Search by title and artist, taking the first match
    Search { title: String, artist: String },
}

/// One planned provider call.
pub struct FetchTask {
    pub source: Source,
    pub lookup: Lookup,
    provider: Arc<dyn AlbumProvider>,
}

impl FetchTask {
    pub fn new(source: Source, lookup: Lookup, provider: Arc<dyn AlbumProvider>) -> Self {
        Self {
            source,
            lookup,
            provider,
        }
    }

    /// Run the call. Errors are captured, never returned.
    pub async fn execute(&self) -> Outcome {
        let result = match &self.lookup {
            Lookup::ById(id) => self.provider.fetch_by_id(id).await,
            Lookup::Search { title, artist } => self.provider.search(title, artist).await,
        };

        match result {
            Ok(Some(record)) if !record.is_empty() => Outcome::Data(record),
            Ok(_) => Outcome::Empty,
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl std::fmt::Debug for FetchTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTask")
            .field("source", &self.source)
            .field("lookup", &self.lookup)
            .finish()
    }
}

/// What a single provider call produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    Data(AlbumRecord),
    Empty,
    Failed(ProviderError),
    /// Still running when the global timeout expired; abandoned.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub provider: Source,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl FetchOutcome {
    pub fn record(&self) -> Option<&AlbumRecord> {
        match &self.outcome {
            Outcome::Data(record) => Some(record),
            _ => None,
        }
    }
}

/// Provider records keyed by source; only `Data` outcomes contribute.
pub fn records(outcomes: Vec<FetchOutcome>) -> BTreeMap<Source, AlbumRecord> {
    outcomes
        .into_iter()
        .filter_map(|o| match o.outcome {
            Outcome::Data(record) => Some((o.provider, record)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::album::keys;
    use crate::test_utils::FakeProvider;

    fn outcome(provider: Source, outcome: Outcome) -> FetchOutcome {
        FetchOutcome {
            provider,
            outcome,
            elapsed: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_execute_by_id_and_search() {
        let provider = Arc::new(
            FakeProvider::new(Source::Spotify)
                .with_album("sp1", AlbumRecord::new().with(keys::TITLE, "By Id"))
                .with_search_result(AlbumRecord::new().with(keys::TITLE, "Searched")),
        );

        let by_id = FetchTask::new(Source::Spotify, Lookup::ById("sp1".into()), provider.clone());
        let search = FetchTask::new(
            Source::Spotify,
            Lookup::Search {
                title: "t".into(),
                artist: "a".into(),
            },
            provider.clone(),
        );

        assert!(matches!(by_id.execute().await, Outcome::Data(r) if r.get_str(keys::TITLE) == Some("By Id")));
        assert!(matches!(search.execute().await, Outcome::Data(r) if r.get_str(keys::TITLE) == Some("Searched")));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_execute_empty_and_failed() {
        let unknown = FetchTask::new(
            Source::Discogs,
            Lookup::ById("missing".into()),
            Arc::new(FakeProvider::new(Source::Discogs)),
        );
        assert!(matches!(unknown.execute().await, Outcome::Empty));

        let failing = FetchTask::new(
            Source::Discogs,
            Lookup::ById("1".into()),
            Arc::new(FakeProvider::new(Source::Discogs).failing()),
        );
        assert!(matches!(failing.execute().await, Outcome::Failed(_)));
    }

    #[test]
    fn test_records_keeps_only_data() {
        let map = records(vec![
            outcome(Source::Spotify, Outcome::Data(AlbumRecord::new().with(keys::TITLE, "A"))),
            outcome(Source::Discogs, Outcome::Empty),
            outcome(Source::Lastfm, Outcome::TimedOut),
            outcome(Source::Musicbrainz, Outcome::Failed(ProviderError::RateLimited)),
        ]);

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![Source::Spotify]);
    }
}
