//! Destination model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use wishmap_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `destinations` table.
///
/// Coordinates are always numeric here regardless of how the backend stores
/// them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub rank: i32,
    pub destination: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reason: String,
    pub budget: String,
    pub timeline: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a destination. Defaults are applied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDestination {
    pub rank: i32,
    pub destination: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reason: String,
    pub budget: String,
    pub timeline: String,
    pub image_url: Option<String>,
}

/// DTO for partially updating a destination.
///
/// `None` keeps the stored value. `image_url` distinguishes "keep"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDestination {
    pub rank: Option<i32>,
    pub destination: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub image_url: Option<Option<String>>,
}

impl UpdateDestination {
    /// Merge this update over an existing row.
    ///
    /// `id` and both timestamps are carried over unchanged; the backend sets
    /// `updated_at` when it writes the merged row.
    pub fn apply_to(&self, existing: &Destination) -> Destination {
        Destination {
            id: existing.id,
            rank: self.rank.unwrap_or(existing.rank),
            destination: pick(&self.destination, &existing.destination),
            country: pick(&self.country, &existing.country),
            latitude: self.latitude.unwrap_or(existing.latitude),
            longitude: self.longitude.unwrap_or(existing.longitude),
            reason: pick(&self.reason, &existing.reason),
            budget: pick(&self.budget, &existing.budget),
            timeline: pick(&self.timeline, &existing.timeline),
            image_url: match &self.image_url {
                Some(url) => url.clone(),
                None => existing.image_url.clone(),
            },
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        }
    }
}

fn pick(update: &Option<String>, existing: &str) -> String {
    update.as_deref().unwrap_or(existing).to_string()
}
