pub mod destinations;
pub mod geocode;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /destinations                    list, create, bulk reorder (GET, POST, PATCH)
/// /destinations/{id}               get, replace, delete (GET, PUT, DELETE)
/// /destinations/{id}/move          move up/down one position (POST)
///
/// /geocode?place=&country=         resolve coordinates (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/destinations", destinations::router())
        .merge(geocode::router())
}
