//! Test utilities and fakes for album-resolver tests.
//!
//! Provides call-counting fakes for the local store and the providers so
//! tests can assert exactly which collaborators a request touched, plus a
//! temporary SQLite store.
//!
//! # Example
//!
//! ```ignore
//! use album_resolver::test_utils::{FakeProvider, FakeStore};
//!
//! let store = Arc::new(FakeStore::new());
//! let spotify = Arc::new(FakeProvider::new(Source::Spotify).failing());
//! // ... build a service, resolve, then assert on store.total_calls()
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::album::{AlbumRecord, Source, keys};
use crate::providers::{AlbumProvider, ProviderError};
use crate::store::{LocalStore, SqliteStore, StoreError};

/// Creates a temporary SQLite store for testing.
///
/// The database lives in a temporary directory that is cleaned up when the
/// returned `TempDir` is dropped. Migrations are run automatically.
///
/// ```ignore
/// let (store, _dir) = temp_store().await;
/// ```
pub async fn temp_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = crate::config::sqlite_url(&db_path);

    let store = SqliteStore::open(&db_url)
        .await
        .expect("Failed to initialize test database");

    (store, dir)
}

// ============================================================================
// Fake local store
// ============================================================================

/// In-memory [`LocalStore`] with per-method call counters.
///
/// Ids are assigned sequentially from 1; non-numeric ids are rejected the
/// same way the SQLite store rejects them.
#[derive(Default)]
pub struct FakeStore {
    albums: Mutex<Vec<AlbumRecord>>,
    failing: bool,
    title_artist_misses: AtomicUsize,
    id_calls: AtomicUsize,
    external_calls: AtomicUsize,
    title_artist_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup fails with a database error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// The next `n` title/artist lookups miss even when an album matches.
    pub fn miss_title_artist_lookups(&self, n: usize) {
        self.title_artist_misses.store(n, Ordering::SeqCst);
    }

    /// Store an album and return its assigned id.
    pub fn add(&self, mut album: AlbumRecord) -> String {
        let mut albums = self.albums.lock().unwrap();
        let id = (albums.len() + 1).to_string();
        album.insert(keys::ID, id.clone());
        albums.push(album);
        id
    }

    pub fn get(&self, id: &str) -> Option<AlbumRecord> {
        self.albums
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.get_str(keys::ID) == Some(id))
            .cloned()
    }

    pub fn id_calls(&self) -> usize {
        self.id_calls.load(Ordering::SeqCst)
    }

    pub fn external_calls(&self) -> usize {
        self.external_calls.load(Ordering::SeqCst)
    }

    pub fn title_artist_calls(&self) -> usize {
        self.title_artist_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.id_calls() + self.external_calls() + self.title_artist_calls()
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }

    fn find(&self, predicate: impl Fn(&AlbumRecord) -> bool) -> Option<AlbumRecord> {
        self.albums
            .lock()
            .unwrap()
            .iter()
            .find(|a| predicate(a))
            .cloned()
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

#[async_trait]
impl LocalStore for FakeStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, StoreError> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;

        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidId(id.to_string()))?;
        let id = id.to_string();
        Ok(self.find(|a| a.get_str(keys::ID) == Some(id.as_str())))
    }

    async fn find_by_external_id(
        &self,
        source: Source,
        native_id: &str,
    ) -> Result<Option<AlbumRecord>, StoreError> {
        let key = match source {
            Source::Db => return self.find_by_id(native_id).await,
            Source::Spotify => keys::SPOTIFY_ID,
            Source::Discogs => keys::DISCOGS_ID,
            Source::Lastfm | Source::Musicbrainz => keys::MBID,
        };

        self.external_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self.find(|a| a.get_str(key) == Some(native_id)))
    }

    async fn find_by_title_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, StoreError> {
        self.title_artist_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;

        let skip = self
            .title_artist_misses
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if skip {
            return Ok(None);
        }

        Ok(self.find(|a| {
            contains_ignore_case(a.get_str(keys::TITLE), title)
                && contains_ignore_case(a.get_str(keys::ARTIST), artist)
        }))
    }
}

// ============================================================================
// Fake provider
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Respond,
    Fail,
    Panic,
}

/// Scripted [`AlbumProvider`] that counts its calls.
///
/// Unknown ids and searches without a scripted result return `Ok(None)`.
pub struct FakeProvider {
    source: Source,
    by_id: HashMap<String, AlbumRecord>,
    search_result: Option<AlbumRecord>,
    delay: Option<Duration>,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            by_id: HashMap::new(),
            search_result: None,
            delay: None,
            behavior: Behavior::Respond,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_album(mut self, id: &str, album: AlbumRecord) -> Self {
        self.by_id.insert(id.to_string(), album);
        self
    }

    pub fn with_search_result(mut self, album: AlbumRecord) -> Self {
        self.search_result = Some(album);
        self
    }

    /// Sleep before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call returns a network error.
    pub fn failing(mut self) -> Self {
        self.behavior = Behavior::Fail;
        self
    }

    /// Every call panics.
    pub fn panicking(mut self) -> Self {
        self.behavior = Behavior::Panic;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, found: Option<&AlbumRecord>) -> Result<Option<AlbumRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.behavior {
            Behavior::Respond => Ok(found.cloned()),
            Behavior::Fail => Err(ProviderError::Network(format!(
                "{} is unreachable",
                self.source
            ))),
            Behavior::Panic => panic!("{} provider exploded", self.source),
        }
    }
}

#[async_trait]
impl AlbumProvider for FakeProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, ProviderError> {
        self.answer(self.by_id.get(id)).await
    }

    async fn search(
        &self,
        _title: &str,
        _artist: &str,
    ) -> Result<Option<AlbumRecord>, ProviderError> {
        self.answer(self.search_result.as_ref()).await
    }
}
