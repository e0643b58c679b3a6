//! Pass-through to the external geocoder, so the front end can resolve a
//! place name before submitting a destination.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wishmap_core::destination::validate_required_text;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /geocode`.
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub place: Option<String>,
    pub country: Option<String>,
}

/// GET /api/v1/geocode?place=&country=
///
/// Returns the best match, or 404 when the geocoder knows no such place.
pub async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> AppResult<impl IntoResponse> {
    let place = validate_required_text(params.place.as_deref(), "place")?;
    let country = validate_required_text(params.country.as_deref(), "country")?;

    let found = state
        .geocoder
        .lookup(&place, &country)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No location found for '{place}, {country}'")))?;

    Ok(Json(found))
}
