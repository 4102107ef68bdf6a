//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub guests: usize,
    pub households: usize,
}

/// GET /health: reports whether the guest list can be loaded from the store.
pub async fn check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.guest_list.guest_list().await {
        Ok(list) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                guests: list.guests().len(),
                households: list.households().len(),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check failed to load guest list");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    guests: 0,
                    households: 0,
                }),
            )
        }
    }
}
