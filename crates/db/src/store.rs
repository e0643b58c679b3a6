//! The single entry point the HTTP layer uses for destination storage.

use std::sync::Arc;

use wishmap_core::ranking::{contiguous_ranks, move_item, MoveDirection, RankAssignment};
use wishmap_core::types::DbId;

use crate::backend::{BackendKind, DestinationBackend};
use crate::models::destination::{CreateDestination, Destination, UpdateDestination};

/// Backend-agnostic destination storage.
///
/// Cheap to clone. Reads of the whole list degrade to an empty list on
/// failure; every other operation returns its error to the caller. All
/// failures are logged here with the operation and id before returning.
#[derive(Clone)]
pub struct DestinationStore {
    backend: Arc<dyn DestinationBackend>,
}

impl DestinationStore {
    pub fn new(backend: Arc<dyn DestinationBackend>) -> Self {
        Self { backend }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.backend.health_check().await
    }

    /// All destinations ascending by rank. Never fails.
    pub async fn list(&self) -> Vec<Destination> {
        match self.backend.list().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, backend = %self.kind(), "Failed to list destinations");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        self.backend.find_by_id(id).await.inspect_err(|e| {
            tracing::error!(error = %e, id, "Failed to load destination");
        })
    }

    pub async fn create(&self, dto: &CreateDestination) -> Result<Destination, sqlx::Error> {
        self.backend.create(dto).await.inspect_err(|e| {
            tracing::error!(error = %e, destination = %dto.destination, "Failed to create destination");
        })
    }

    pub async fn update(
        &self,
        id: DbId,
        dto: &UpdateDestination,
    ) -> Result<Option<Destination>, sqlx::Error> {
        self.backend.update(id, dto).await.inspect_err(|e| {
            tracing::error!(error = %e, id, "Failed to update destination");
        })
    }

    /// Returns `false` when no destination had this id.
    pub async fn remove(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.backend.delete(id).await.inspect_err(|e| {
            tracing::error!(error = %e, id, "Failed to delete destination");
        })
    }

    /// Apply a batch of rank assignments atomically.
    pub async fn update_ranks(&self, ranks: &[RankAssignment]) -> Result<(), sqlx::Error> {
        self.backend.update_ranks(ranks).await.inspect_err(|e| {
            tracing::error!(error = %e, count = ranks.len(), "Failed to update destination ranks");
        })
    }

    /// Move one destination up or down by one position and renumber the
    /// whole list `1..=N`.
    ///
    /// Returns the refreshed list, or `None` if `id` does not exist. Moving
    /// past either end leaves the list untouched.
    pub async fn move_destination(
        &self,
        id: DbId,
        direction: MoveDirection,
    ) -> Result<Option<Vec<Destination>>, sqlx::Error> {
        let current = self.backend.list().await.inspect_err(|e| {
            tracing::error!(error = %e, id, "Failed to load destinations for move");
        })?;
        let ids: Vec<DbId> = current.iter().map(|d| d.id).collect();

        let reordered = match move_item(&ids, id, direction) {
            Ok(Some(reordered)) => reordered,
            Ok(None) => return Ok(Some(current)),
            Err(_) => return Ok(None),
        };

        self.update_ranks(&contiguous_ranks(&reordered)).await?;

        let refreshed = self.backend.list().await.inspect_err(|e| {
            tracing::error!(error = %e, id, "Failed to reload destinations after move");
        })?;
        Ok(Some(refreshed))
    }
}
