//! SQLite-backed album catalog.
//!
//! Each album is one row: the full document as JSON plus the columns the
//! lookup strategies search on (title, artist and the provider ids).
//! Title/artist search runs against lowercased key columns filled in Rust,
//! since SQLite only folds ASCII case.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::FromRow;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::{LocalStore, StoreError};
use crate::album::{AlbumRecord, Source, keys};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "album_resolver.db";

const SELECT_ALBUM: &str =
    "SELECT id, title, artist, spotify_id, mbid, discogs_id, document, created_at FROM albums";

#[derive(Debug, Clone, FromRow)]
struct AlbumRow {
    id: i64,
    title: String,
    artist: String,
    spotify_id: Option<String>,
    mbid: Option<String>,
    discogs_id: Option<String>,
    document: String,
    created_at: String,
}

impl AlbumRow {
    /// The stored document with the indexed columns filled back in and `_id`
    /// exposed as a string.
    fn into_record(self) -> Result<AlbumRecord, StoreError> {
        let document: Map<String, Value> = match serde_json::from_str(&self.document)? {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidDocument(format!(
                    "album {} document is not an object: {}",
                    self.id, other
                )));
            }
        };

        let mut record = AlbumRecord::from(document);
        record.remove(keys::ID);
        record.insert(keys::ID, self.id.to_string());

        let columns = AlbumRecord::new()
            .with(keys::TITLE, self.title)
            .with(keys::ARTIST, self.artist)
            .with(keys::SPOTIFY_ID, self.spotify_id)
            .with(keys::MBID, self.mbid)
            .with(keys::DISCOGS_ID, self.discogs_id)
            .with("created_at", self.created_at);
        record.fill_missing(&columns);

        Ok(record)
    }
}

/// Search key for the `title_key`/`artist_key` columns.
fn search_key(text: &str) -> String {
    text.to_lowercase()
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn column_for(source: Source) -> Option<&'static str> {
    match source {
        Source::Db => None,
        Source::Spotify => Some("spotify_id"),
        Source::Discogs => Some("discogs_id"),
        Source::Lastfm | Source::Musicbrainz => Some("mbid"),
    }
}

/// SQLite album catalog
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database and run migrations.
    pub async fn open(db_url: &str) -> Result<Self, StoreError> {
        if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
            sqlx::Sqlite::create_database(db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool. Migrations must already have run.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert an album document, returning its new id.
    ///
    /// `title` and `artist` are required; any `_id` in the document is ignored.
    pub async fn insert_album(&self, album: &AlbumRecord) -> Result<i64, StoreError> {
        let (Some(title), Some(artist)) = (album.get_str(keys::TITLE), album.get_str(keys::ARTIST))
        else {
            return Err(StoreError::InvalidDocument(
                "album needs a title and an artist".to_string(),
            ));
        };

        let mut document = album.clone();
        document.remove(keys::ID);
        let json = serde_json::to_string(&document)?;

        let result = sqlx::query(
            "INSERT INTO albums (title, artist, title_key, artist_key, spotify_id, mbid, discogs_id, document, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(artist)
        .bind(search_key(title))
        .bind(search_key(artist))
        .bind(album.get_str(keys::SPOTIFY_ID))
        .bind(album.get_str(keys::MBID))
        .bind(album.get_str(keys::DISCOGS_ID))
        .bind(json)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, title, artist, "Inserted album");
        Ok(id)
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<AlbumRecord>, StoreError> {
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidId(id.to_string()))?;

        let sql = format!("{SELECT_ALBUM} WHERE id = ?");
        let row: Option<AlbumRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(AlbumRow::into_record).transpose()
    }

    async fn find_by_external_id(
        &self,
        source: Source,
        native_id: &str,
    ) -> Result<Option<AlbumRecord>, StoreError> {
        let Some(column) = column_for(source) else {
            return self.find_by_id(native_id).await;
        };

        let sql = format!("{SELECT_ALBUM} WHERE {column} = ? ORDER BY id LIMIT 1");
        let row: Option<AlbumRow> = sqlx::query_as(&sql)
            .bind(native_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(AlbumRow::into_record).transpose()
    }

    async fn find_by_title_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<AlbumRecord>, StoreError> {
        let sql = format!(
            "{SELECT_ALBUM} WHERE title_key LIKE ? ESCAPE '\\' AND artist_key LIKE ? ESCAPE '\\' \
             ORDER BY id LIMIT 1"
        );
        let row: Option<AlbumRow> = sqlx::query_as(&sql)
            .bind(like_pattern(&search_key(title)))
            .bind(like_pattern(&search_key(artist)))
            .fetch_optional(&self.pool)
            .await?;
        row.map(AlbumRow::into_record).transpose()
    }
}
