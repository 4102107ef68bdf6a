pub mod error;
pub mod memory;
pub mod postgres;
pub mod snapshot;
pub mod store;

pub use error::{Result, SnapshotStoreError};
pub use memory::InMemorySnapshotStore;
pub use postgres::{DEFAULT_STREAM, PostgresSnapshotStore};
pub use snapshot::{Snapshot, Version};
pub use store::{SaveOptions, SnapshotStore, SnapshotStoreExt};
