use axum::routing::get;
use axum::Router;

use crate::handlers::geocode;
use crate::state::AppState;

/// Geocoding pass-through mounted at `/geocode`.
pub fn router() -> Router<AppState> {
    Router::new().route("/geocode", get(geocode::geocode))
}
