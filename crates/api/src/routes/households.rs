//! Household management and RSVP endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{GuestId, HouseholdId};
use domain::{AddGuestToHousehold, CreateHousehold, GuestList, GuestUpdate, Household, Rsvp};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::guests::GuestResponse;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGuestToHouseholdRequest {
    pub guest_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    pub household_code: String,
    pub guests: Vec<RsvpGuestRequest>,
}

/// Full replacement of one guest's details.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpGuestRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub dietary_requirements: Option<String>,
    pub attending: Option<bool>,
    #[serde(default)]
    pub is_child: bool,
    pub household: Option<u32>,
}

impl From<RsvpGuestRequest> for GuestUpdate {
    fn from(req: RsvpGuestRequest) -> Self {
        GuestUpdate {
            id: GuestId::from(req.id),
            name: req.name,
            email: req.email,
            dietary_requirements: req.dietary_requirements,
            attending: req.attending,
            is_child: req.is_child,
            household: req.household.map(HouseholdId::new),
        }
    }
}

// -- Response types --

/// A household with its guests joined in roster order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdResponse {
    pub id: u32,
    pub code: String,
    pub guests: Vec<GuestResponse>,
}

impl HouseholdResponse {
    pub fn new(list: &GuestList, household: &Household) -> Self {
        Self {
            id: household.id().as_u32(),
            code: household.code().to_string(),
            guests: list
                .members(household)
                .into_iter()
                .map(GuestResponse::from)
                .collect(),
        }
    }

    /// Loads the current list and builds the response for one household.
    pub async fn load(state: &AppState, household_id: HouseholdId) -> Result<Self, ApiError> {
        let list = state.guest_list.guest_list().await?;
        let household = list
            .household(household_id)
            .ok_or_else(|| ApiError::NotFound(format!("Household {household_id} not found")))?;
        Ok(Self::new(&list, household))
    }
}

// -- Handlers --

/// POST /households: create the next household.
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<HouseholdResponse>), ApiError> {
    let household = state.guest_list.create_household(CreateHousehold).await?;

    Ok((
        StatusCode::CREATED,
        Json(HouseholdResponse {
            id: household.id().as_u32(),
            code: household.code().to_string(),
            guests: Vec::new(),
        }),
    ))
}

/// GET /households: list every household with its guests.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HouseholdResponse>>, ApiError> {
    let list = state.guest_list.guest_list().await?;
    let households = list
        .households()
        .iter()
        .map(|household| HouseholdResponse::new(&list, household))
        .collect();

    Ok(Json(households))
}

/// GET /households/{id}: load a household by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HouseholdResponse>, ApiError> {
    let household_id = parse_household_id(&id)?;
    HouseholdResponse::load(&state, household_id).await.map(Json)
}

/// GET /households/code/{code}: load a household by its RSVP code.
#[tracing::instrument(skip(state))]
pub async fn get_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<HouseholdResponse>, ApiError> {
    let list = state.guest_list.guest_list().await?;
    let household = list
        .household_by_code(&code)
        .ok_or_else(|| ApiError::NotFound(format!("Household with code {code} not found")))?;

    Ok(Json(HouseholdResponse::new(&list, household)))
}

/// PUT /households/{id}/guests: put a guest on the household's roster.
#[tracing::instrument(skip(state, req), fields(guest_id = %req.guest_id))]
pub async fn add_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AddGuestToHouseholdRequest>,
) -> Result<Json<HouseholdResponse>, ApiError> {
    let household_id = parse_household_id(&id)?;

    state
        .guest_list
        .add_guest_to_household(AddGuestToHousehold::new(household_id, req.guest_id))
        .await?;

    HouseholdResponse::load(&state, household_id).await.map(Json)
}

/// PUT /households/rsvp: submit a household's RSVP.
#[tracing::instrument(skip(state, req), fields(code = %req.household_code))]
pub async fn rsvp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RsvpRequest>,
) -> Result<Json<HouseholdResponse>, ApiError> {
    let guests = req.guests.into_iter().map(GuestUpdate::from).collect();

    let household = state
        .guest_list
        .rsvp(Rsvp::new(req.household_code, guests))
        .await?;

    HouseholdResponse::load(&state, household.id()).await.map(Json)
}

fn parse_household_id(id: &str) -> Result<HouseholdId, ApiError> {
    let raw: u32 = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid household ID format: {e}")))?;
    Ok(HouseholdId::new(raw))
}
