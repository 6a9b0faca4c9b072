use chrono::{DateTime, Utc};
use eyre::Result;
use log::{debug, info};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

/// A persisted transcript. Records are immutable after creation: the store
/// exposes only lookup and insert-if-absent.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TranscriptRecord {
    pub id: i64,
    pub video_url: String,
    pub video_id: String,
    pub title: String,
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields supplied when storing a freshly fetched transcript.
#[derive(Debug, Clone)]
pub struct NewTranscript {
    pub video_url: String,
    pub video_id: String,
    pub title: String,
    pub transcript: Option<String>,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transcripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    video_url TEXT NOT NULL,
    video_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    transcript TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

#[derive(Clone)]
pub struct TranscriptStore {
    pool: SqlitePool,
}

impl TranscriptStore {
    /// Open (creating if necessary) the database at `database_url` and make
    /// sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");

        if !in_memory && !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            info!("Creating database: {database_url}");
            Sqlite::create_database(database_url).await?;
        }

        // An in-memory database exists per connection, so it must be pinned
        // to a single one.
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        info!("Transcript store ready: {database_url}");
        Ok(Self { pool })
    }

    pub async fn find_by_video_id(&self, video_id: &str) -> Result<Option<TranscriptRecord>> {
        let record = sqlx::query_as::<_, TranscriptRecord>(
            "SELECT id, video_url, video_id, title, transcript, created_at, updated_at
             FROM transcripts WHERE video_id = ?",
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Insert a transcript if none exists for its video ID, and return the
    /// persisted record. When two concurrent requests race on the same ID,
    /// both get the row the winner wrote.
    pub async fn insert(&self, new: NewTranscript) -> Result<TranscriptRecord> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO transcripts (video_url, video_id, title, transcript, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(video_id) DO NOTHING",
        )
        .bind(&new.video_url)
        .bind(&new.video_id)
        .bind(&new.title)
        .bind(&new.transcript)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!("Stored transcript for video {}", new.video_id);

        self.find_by_video_id(&new.video_id)
            .await?
            .ok_or_else(|| eyre::eyre!("transcript for {} missing after insert", new.video_id))
    }
}
