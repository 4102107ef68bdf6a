//! Guest registration and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{GuestId, HouseholdId};
use domain::{AddGuest, Guest, MoveGuest, NewGuest};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::households::HouseholdResponse;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub dietary_requirements: Option<String>,
    pub attending: Option<bool>,
    #[serde(default)]
    pub is_child: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveGuestRequest {
    pub household_id: u32,
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub dietary_requirements: Option<String>,
    pub attending: Option<bool>,
    pub is_child: bool,
    pub household: Option<u32>,
}

impl From<&Guest> for GuestResponse {
    fn from(guest: &Guest) -> Self {
        Self {
            id: guest.id().to_string(),
            name: guest.name().to_string(),
            email: guest.email().to_string(),
            dietary_requirements: guest.dietary_requirements().map(String::from),
            attending: guest.attending(),
            is_child: guest.is_child(),
            household: guest.household().map(u32::from),
        }
    }
}

// -- Handlers --

/// POST /guests: register a guest.
#[tracing::instrument(skip(state, req), fields(name = %req.name))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<GuestResponse>), ApiError> {
    let details = NewGuest {
        name: req.name,
        email: req.email,
        dietary_requirements: req.dietary_requirements,
        attending: req.attending,
        is_child: req.is_child,
    };
    let cmd = match req.id {
        Some(id) if !id.trim().is_empty() => AddGuest::new(details).with_id(id),
        _ => AddGuest::new(details),
    };

    let guest = state.guest_list.add_guest(cmd).await?;

    Ok((StatusCode::CREATED, Json(GuestResponse::from(&guest))))
}

/// GET /guests: list every guest.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<GuestResponse>>, ApiError> {
    let list = state.guest_list.guest_list().await?;
    Ok(Json(list.guests().iter().map(GuestResponse::from).collect()))
}

/// GET /guests/{id}: load a guest by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GuestResponse>, ApiError> {
    let guest = state
        .guest_list
        .guest(&GuestId::from(id.as_str()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Guest {id} not found")))?;

    Ok(Json(GuestResponse::from(&guest)))
}

/// PUT /guests/{id}/household: move a guest to another household.
#[tracing::instrument(skip(state, req), fields(household_id = req.household_id))]
pub async fn move_to_household(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveGuestRequest>,
) -> Result<Json<HouseholdResponse>, ApiError> {
    let household_id = HouseholdId::new(req.household_id);

    state
        .guest_list
        .move_guest(MoveGuest::new(id, household_id))
        .await?;

    HouseholdResponse::load(&state, household_id).await.map(Json)
}
