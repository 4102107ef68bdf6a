//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p snapshot-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use snapshot_store::{
    PostgresSnapshotStore, SaveOptions, Snapshot, SnapshotStore, SnapshotStoreError,
    SnapshotStoreExt, Version,
};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresSnapshotStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a store on its own stream so tests don't see each other's rows
async fn get_test_store(stream: &str) -> PostgresSnapshotStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("DELETE FROM guest_list_snapshots WHERE stream = $1")
        .bind(stream)
        .execute(&pool)
        .await
        .unwrap();

    PostgresSnapshotStore::with_stream(pool, stream)
}

fn guest_list_state(names: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "guests": names,
        "households": [],
    })
}

#[tokio::test]
async fn load_returns_none_before_first_save() {
    let store = get_test_store("empty").await;

    assert!(store.load().await.unwrap().is_none());
    assert_eq!(store.current_version().await.unwrap(), Version::initial());
}

#[tokio::test]
async fn save_and_load_snapshot() {
    let store = get_test_store("save-and-load").await;

    let snapshot = Snapshot::new(Version::first(), guest_list_state(&["Alice"]));
    let version = store
        .save(snapshot, SaveOptions::expect_new())
        .await
        .unwrap();
    assert_eq!(version, Version::first());

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.version, Version::first());
    assert_eq!(loaded.state, guest_list_state(&["Alice"]));
}

#[tokio::test]
async fn save_replaces_previous_snapshot() {
    let store = get_test_store("replace").await;

    store
        .save(
            Snapshot::new(Version::first(), guest_list_state(&["Alice"])),
            SaveOptions::expect_new(),
        )
        .await
        .unwrap();
    store
        .save(
            Snapshot::new(Version::new(2), guest_list_state(&["Alice", "Bob"])),
            SaveOptions::expect_version(Version::first()),
        )
        .await
        .unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.version, Version::new(2));
    assert_eq!(loaded.state, guest_list_state(&["Alice", "Bob"]));
}

#[tokio::test]
async fn stale_writer_gets_concurrency_conflict() {
    let store = get_test_store("stale").await;

    store
        .save(
            Snapshot::new(Version::first(), guest_list_state(&["Alice"])),
            SaveOptions::expect_new(),
        )
        .await
        .unwrap();

    let result = store
        .save(
            Snapshot::new(Version::first(), guest_list_state(&["Bob"])),
            SaveOptions::expect_new(),
        )
        .await;

    assert!(matches!(
        result,
        Err(SnapshotStoreError::ConcurrencyConflict { .. })
    ));

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.state, guest_list_state(&["Alice"]));
}

#[tokio::test]
async fn streams_are_isolated() {
    let first = get_test_store("stream-a").await;
    let second = get_test_store("stream-b").await;

    first
        .save(
            Snapshot::new(Version::first(), guest_list_state(&["Alice"])),
            SaveOptions::expect_new(),
        )
        .await
        .unwrap();

    assert!(second.load().await.unwrap().is_none());
    assert!(first.has_snapshot().await.unwrap());
}
