//! HTTP API server with observability for the guest list service.
//!
//! Provides REST endpoints for guests, households and RSVPs,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::GuestListService;
use metrics_exporter_prometheus::PrometheusHandle;
use snapshot_store::SnapshotStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Snapshot store selected at startup.
pub type SharedStore = Arc<dyn SnapshotStore>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub guest_list: GuestListService<SharedStore>,
}

impl AppState {
    /// Creates the application state over the given snapshot store.
    pub fn new(store: SharedStore) -> Arc<Self> {
        Arc::new(Self {
            guest_list: GuestListService::new(store),
        })
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/guests",
            get(routes::guests::list).post(routes::guests::create),
        )
        .route("/guests/{id}", get(routes::guests::get))
        .route(
            "/guests/{id}/household",
            put(routes::guests::move_to_household),
        )
        .route(
            "/households",
            get(routes::households::list).post(routes::households::create),
        )
        .route("/households/rsvp", put(routes::households::rsvp))
        .route(
            "/households/code/{code}",
            get(routes::households::get_by_code),
        )
        .route("/households/{id}", get(routes::households::get))
        .route(
            "/households/{id}/guests",
            put(routes::households::add_guest),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
