use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Result, Snapshot, SnapshotStoreError, Version,
    store::{SaveOptions, SnapshotStore, check_save},
};

/// Stream name used when none is configured.
pub const DEFAULT_STREAM: &str = "default";

/// PostgreSQL-backed snapshot store implementation.
///
/// Each store instance reads and writes one stream (one row of
/// `guest_list_snapshots`), so several guest lists can share a database.
#[derive(Clone)]
pub struct PostgresSnapshotStore {
    pool: PgPool,
    stream: String,
}

impl PostgresSnapshotStore {
    /// Creates a new PostgreSQL snapshot store for the default stream.
    pub fn new(pool: PgPool) -> Self {
        Self::with_stream(pool, DEFAULT_STREAM)
    }

    /// Creates a new PostgreSQL snapshot store for a named stream.
    pub fn with_stream(pool: PgPool, stream: impl Into<String>) -> Self {
        Self {
            pool,
            stream: stream.into(),
        }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_snapshot(row: PgRow) -> Result<Snapshot> {
        Ok(Snapshot {
            version: Version::new(row.try_get("version")?),
            timestamp: row.try_get::<DateTime<Utc>, _>("timestamp")?,
            state: row.try_get("state")?,
        })
    }
}

#[async_trait]
impl SnapshotStore for PostgresSnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT version, timestamp, state
            FROM guest_list_snapshots
            WHERE stream = $1
            "#,
        )
        .bind(&self.stream)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_snapshot).transpose()
    }

    async fn save(&self, snapshot: Snapshot, options: SaveOptions) -> Result<Version> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so two writers cannot both pass the version check
        let current: Option<i64> = sqlx::query_scalar(
            "SELECT version FROM guest_list_snapshots WHERE stream = $1 FOR UPDATE",
        )
        .bind(&self.stream)
        .fetch_optional(&mut *tx)
        .await?;

        let current = current.map(Version::new).unwrap_or_default();
        check_save(current, &snapshot, &options)?;

        // The WHERE guard makes the upsert a no-op when a racing writer got
        // there first (two first-time writers both miss the row lock).
        let result = sqlx::query(
            r#"
            INSERT INTO guest_list_snapshots (stream, version, timestamp, state)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (stream) DO UPDATE SET
                version = EXCLUDED.version,
                timestamp = EXCLUDED.timestamp,
                state = EXCLUDED.state
            WHERE guest_list_snapshots.version = $5
            "#,
        )
        .bind(&self.stream)
        .bind(snapshot.version.as_i64())
        .bind(snapshot.timestamp)
        .bind(&snapshot.state)
        .bind(current.as_i64())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            return Err(SnapshotStoreError::ConcurrencyConflict {
                expected: current,
                actual: current.next(),
            });
        }

        tx.commit().await?;
        tracing::debug!(stream = %self.stream, version = %snapshot.version, "saved snapshot");

        Ok(snapshot.version)
    }
}
