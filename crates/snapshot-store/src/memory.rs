use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Result, Snapshot, Version,
    store::{SaveOptions, SnapshotStore, check_save},
};

/// In-memory snapshot store implementation.
///
/// Used by tests and by the server when no database is configured. Provides
/// the same interface and conflict behaviour as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshot: Arc<RwLock<Option<Snapshot>>>,
}

impl InMemorySnapshotStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the version of the stored snapshot.
    pub async fn version(&self) -> Version {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|s| s.version)
            .unwrap_or_default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: Snapshot, options: SaveOptions) -> Result<Version> {
        let mut stored = self.snapshot.write().await;

        let current = stored.as_ref().map(|s| s.version).unwrap_or_default();
        check_save(current, &snapshot, &options)?;

        let version = snapshot.version;
        *stored = Some(snapshot);
        tracing::debug!(%version, "saved snapshot in memory");

        Ok(version)
    }
}
