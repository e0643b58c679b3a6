use std::sync::Arc;

use wishmap_db::DestinationStore;
use wishmap_geocode::GeocodeClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Destination storage, whichever backend was selected at startup.
    pub store: DestinationStore,
    /// Client for the external geocoder.
    pub geocoder: Arc<GeocodeClient>,
}
