//! The storage capability every destination backend provides.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use wishmap_core::ranking::RankAssignment;
use wishmap_core::types::DbId;

use crate::models::destination::{CreateDestination, Destination, UpdateDestination};

/// Which physical store a backend writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted PostgreSQL, selected by `DATABASE_URL`.
    Postgres,
    /// Local SQLite file.
    Sqlite,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Postgres => f.write_str("postgres"),
            BackendKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Data access for the `destinations` table.
///
/// Implementations report every failure as `sqlx::Error`; deciding which
/// failures degrade and which propagate is the job of
/// [`DestinationStore`](crate::store::DestinationStore).
#[async_trait]
pub trait DestinationBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Create the `destinations` table and its index if they do not exist.
    async fn ensure_schema(&self) -> Result<(), sqlx::Error>;

    /// Run a trivial query to verify the connection is alive.
    async fn health_check(&self) -> Result<(), sqlx::Error>;

    /// All destinations, ascending by rank (ties broken by id).
    async fn list(&self) -> Result<Vec<Destination>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Destination>, sqlx::Error>;

    async fn create(&self, dto: &CreateDestination) -> Result<Destination, sqlx::Error>;

    /// Read-modify-write update. Returns `None` for an unknown id.
    async fn update(
        &self,
        id: DbId,
        dto: &UpdateDestination,
    ) -> Result<Option<Destination>, sqlx::Error>;

    /// Hard delete. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Apply every `(id, rank)` pair in a single transaction. Unknown ids
    /// are skipped.
    async fn update_ranks(&self, ranks: &[RankAssignment]) -> Result<(), sqlx::Error>;
}
