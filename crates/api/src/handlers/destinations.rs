//! Handlers for the destination wishlist.
//!
//! The collection resource (`/destinations`) lists, creates and bulk-reorders;
//! the item resource (`/destinations/{id}`) reads, replaces and deletes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Deserializer};
use wishmap_core::destination::{
    validate_place, DEFAULT_COORDINATE, DEFAULT_RANK, ENTITY_NAME, TIMELINE_UNSCHEDULED,
};
use wishmap_core::error::CoreError;
use wishmap_core::ranking::{validate_rank, MoveDirection, RankAssignment};
use wishmap_core::types::DbId;
use wishmap_db::models::destination::{CreateDestination, UpdateDestination};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /destinations` and `PUT /destinations/{id}`.
///
/// Every field is optional at the serde level so missing required fields
/// surface as a 400 with a field name rather than a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct DestinationPayload {
    pub destination: Option<String>,
    pub country: Option<String>,
    pub rank: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    /// Absent keeps the stored value; explicit `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Blank URLs are stored as `NULL`.
fn normalize_image_url(url: Option<String>) -> Option<String> {
    url.filter(|u| !u.trim().is_empty())
}

impl DestinationPayload {
    /// Validate and apply create-time defaults.
    pub fn into_create(self) -> Result<CreateDestination, CoreError> {
        let (destination, country) =
            validate_place(self.destination.as_deref(), self.country.as_deref())?;
        let rank = self.rank.unwrap_or(DEFAULT_RANK);
        validate_rank(rank)?;

        Ok(CreateDestination {
            rank,
            destination,
            country,
            latitude: self.latitude.unwrap_or(DEFAULT_COORDINATE),
            longitude: self.longitude.unwrap_or(DEFAULT_COORDINATE),
            reason: self.reason.unwrap_or_default(),
            budget: self.budget.unwrap_or_default(),
            timeline: self
                .timeline
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| TIMELINE_UNSCHEDULED.to_string()),
            image_url: normalize_image_url(self.image_url.flatten()),
        })
    }

    /// Validate a replace request. Fields the caller left out keep their
    /// stored values.
    pub fn into_update(self) -> Result<UpdateDestination, CoreError> {
        let (destination, country) =
            validate_place(self.destination.as_deref(), self.country.as_deref())?;
        if let Some(rank) = self.rank {
            validate_rank(rank)?;
        }

        Ok(UpdateDestination {
            rank: self.rank,
            destination: Some(destination),
            country: Some(country),
            latitude: self.latitude,
            longitude: self.longitude,
            reason: self.reason,
            budget: self.budget,
            timeline: self.timeline,
            image_url: self.image_url.map(normalize_image_url),
        })
    }
}

/// Body of `PATCH /destinations`.
///
/// `ranks` stays untyped until validation so a wrong shape is a 400.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ranks: Option<serde_json::Value>,
}

/// Body of `POST /destinations/{id}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// Turn the raw `ranks` value into validated assignments.
pub fn parse_rank_assignments(
    ranks: Option<serde_json::Value>,
) -> Result<Vec<RankAssignment>, AppError> {
    let Some(serde_json::Value::Array(entries)) = ranks else {
        return Err(AppError::BadRequest(
            "ranks is required and must be an array".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<RankAssignment, AppError> {
            let assignment: RankAssignment = serde_json::from_value(entry).map_err(|_| {
                AppError::BadRequest(format!(
                    "ranks[{index}] must be an object with integer id and rank"
                ))
            })?;
            validate_rank(assignment.rank)?;
            Ok(assignment)
        })
        .collect()
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_NAME,
        id,
    })
}

// ---------------------------------------------------------------------------
// Collection resource
// ---------------------------------------------------------------------------

/// GET /api/v1/destinations
///
/// List every destination, ascending by rank.
pub async fn list_destinations(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.list().await)
}

/// POST /api/v1/destinations
pub async fn create_destination(
    State(state): State<AppState>,
    AppJson(input): AppJson<DestinationPayload>,
) -> AppResult<impl IntoResponse> {
    let dto = input.into_create()?;
    let destination = state.store.create(&dto).await?;

    tracing::info!(
        destination_id = destination.id,
        destination = %destination.destination,
        country = %destination.country,
        rank = destination.rank,
        "Destination created",
    );

    Ok((StatusCode::CREATED, Json(destination)))
}

/// PATCH /api/v1/destinations
///
/// Apply a full `(id, rank)` mapping in one transaction.
pub async fn reorder_destinations(
    State(state): State<AppState>,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let ranks = parse_rank_assignments(input.ranks)?;
    state.store.update_ranks(&ranks).await?;

    tracing::info!(count = ranks.len(), "Destination ranks updated");

    Ok(Json(SuccessResponse::ok()))
}

// ---------------------------------------------------------------------------
// Item resource
// ---------------------------------------------------------------------------

/// GET /api/v1/destinations/{id}
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let destination = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(destination))
}

/// PUT /api/v1/destinations/{id}
pub async fn replace_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DestinationPayload>,
) -> AppResult<impl IntoResponse> {
    let dto = input.into_update()?;
    let destination = state
        .store
        .update(id, &dto)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(destination_id = id, "Destination updated");

    Ok(Json(destination))
}

/// DELETE /api/v1/destinations/{id}
pub async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.store.remove(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(destination_id = id, "Destination deleted");

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/destinations/{id}/move
///
/// Swap with the neighbour in `direction` and renumber the list. Returns the
/// refreshed list.
pub async fn move_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let list = state
        .store
        .move_destination(id, input.direction)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(destination_id = id, direction = ?input.direction, "Destination moved");

    Ok(Json(list))
}
