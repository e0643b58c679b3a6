//! Route definitions for the destination wishlist.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::destinations;
use crate::state::AppState;

/// Destination routes mounted at `/destinations`.
///
/// ```text
/// GET    /             -> list_destinations
/// POST   /             -> create_destination
/// PATCH  /             -> reorder_destinations
/// GET    /{id}         -> get_destination
/// PUT    /{id}         -> replace_destination
/// DELETE /{id}         -> delete_destination
/// POST   /{id}/move    -> move_destination
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(destinations::list_destinations)
                .post(destinations::create_destination)
                .patch(destinations::reorder_destinations),
        )
        .route(
            "/{id}",
            get(destinations::get_destination)
                .put(destinations::replace_destination)
                .delete(destinations::delete_destination),
        )
        .route("/{id}/move", post(destinations::move_destination))
}
