use std::sync::Arc;

use async_trait::async_trait;

use crate::{Result, Snapshot, SnapshotStoreError, Version};

/// Options for saving a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Version the writer loaded, for optimistic concurrency control.
    /// If None, no version check is performed (use with caution).
    pub expected_version: Option<Version>,
}

impl SaveOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stored snapshot to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Creates options expecting nothing to be stored yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// Core trait for snapshot store implementations.
///
/// A snapshot store holds the latest snapshot of a single guest list. It
/// supplies the current snapshot to a writer and persists the next one.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the latest snapshot.
    ///
    /// Returns None if nothing has been saved yet.
    async fn load(&self) -> Result<Option<Snapshot>>;

    /// Saves a snapshot, replacing the previous one.
    ///
    /// If `options.expected_version` is set, the operation fails with
    /// `ConcurrencyConflict` when the stored version doesn't match. The
    /// snapshot's own version must be exactly one past the stored version.
    ///
    /// Returns the version the snapshot was stored at.
    async fn save(&self, snapshot: Snapshot, options: SaveOptions) -> Result<Version>;
}

/// Lets a store be chosen at runtime and shared as `Arc<dyn SnapshotStore>`.
#[async_trait]
impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    async fn load(&self) -> Result<Option<Snapshot>> {
        (**self).load().await
    }

    async fn save(&self, snapshot: Snapshot, options: SaveOptions) -> Result<Version> {
        (**self).save(snapshot, options).await
    }
}

/// Extension trait providing convenience methods for snapshot stores.
#[async_trait]
pub trait SnapshotStoreExt: SnapshotStore {
    /// Returns the version of the stored snapshot, or the initial version if
    /// nothing is stored.
    async fn current_version(&self) -> Result<Version> {
        Ok(self
            .load()
            .await?
            .map(|snapshot| snapshot.version)
            .unwrap_or_default())
    }

    /// Checks if anything has been stored yet.
    async fn has_snapshot(&self) -> Result<bool> {
        Ok(self.load().await?.is_some())
    }
}

// Blanket implementation for all SnapshotStore implementations
impl<T: SnapshotStore + ?Sized> SnapshotStoreExt for T {}

/// Checks a save against the currently stored version.
///
/// Shared by the store implementations so they reject stale writes the same
/// way.
pub fn check_save(current: Version, snapshot: &Snapshot, options: &SaveOptions) -> Result<()> {
    if let Some(expected) = options.expected_version
        && expected != current
    {
        return Err(SnapshotStoreError::ConcurrencyConflict {
            expected,
            actual: current,
        });
    }

    if snapshot.version != current.next() {
        return Err(SnapshotStoreError::ConcurrencyConflict {
            expected: snapshot.version,
            actual: current.next(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_at(version: i64) -> Snapshot {
        Snapshot::new(Version::new(version), serde_json::json!({}))
    }

    #[test]
    fn check_save_accepts_next_version() {
        let result = check_save(
            Version::first(),
            &snapshot_at(2),
            &SaveOptions::expect_version(Version::first()),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn check_save_rejects_stale_expected_version() {
        let result = check_save(
            Version::new(2),
            &snapshot_at(2),
            &SaveOptions::expect_version(Version::first()),
        );
        assert!(matches!(
            result,
            Err(SnapshotStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[test]
    fn check_save_rejects_skipped_version() {
        let result = check_save(Version::initial(), &snapshot_at(3), &SaveOptions::new());
        assert!(matches!(
            result,
            Err(SnapshotStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[test]
    fn expect_new_targets_initial_version() {
        assert_eq!(
            SaveOptions::expect_new().expected_version,
            Some(Version::initial())
        );
        assert_eq!(SaveOptions::new().expected_version, None);
    }
}
