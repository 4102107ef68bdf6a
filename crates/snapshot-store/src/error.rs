use thiserror::Error;

use crate::Version;

/// Errors that can occur when interacting with the snapshot store.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// The stored snapshot was not at the version the writer expected.
    /// Another writer saved in between this writer's load and save.
    #[error("Concurrency conflict: expected version {expected}, found {actual}")]
    ConcurrencyConflict { expected: Version, actual: Version },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnapshotStoreError {
    /// Returns true if this error is a concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SnapshotStoreError::ConcurrencyConflict { .. })
    }
}

/// Result type for snapshot store operations.
pub type Result<T> = std::result::Result<T, SnapshotStoreError>;
