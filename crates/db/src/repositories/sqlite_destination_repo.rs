//! SQLite backend for the `destinations` table.
//!
//! The local store keeps a single long-lived connection for the life of the
//! process. `AUTOINCREMENT` guarantees ids of deleted rows are never handed
//! out again.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use wishmap_core::destination::{next_updated_at, now_micros};
use wishmap_core::ranking::RankAssignment;
use wishmap_core::types::{DbId, Timestamp};

use crate::backend::{BackendKind, DestinationBackend};
use crate::models::destination::{CreateDestination, Destination, UpdateDestination};

/// Path value selecting a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Column list for `destinations` queries.
const COLUMNS: &str = "\
    id, rank, destination, country, latitude, longitude, \
    reason, budget, timeline, image_url, created_at, updated_at";

/// Idempotent DDL, one statement per entry.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS destinations ( \
         id          INTEGER PRIMARY KEY AUTOINCREMENT, \
         rank        INTEGER NOT NULL DEFAULT 1 CHECK (rank >= 1), \
         destination TEXT NOT NULL, \
         country     TEXT NOT NULL, \
         latitude    REAL NOT NULL, \
         longitude   REAL NOT NULL, \
         reason      TEXT NOT NULL DEFAULT '', \
         budget      TEXT NOT NULL DEFAULT '', \
         timeline    TEXT NOT NULL DEFAULT 'unscheduled', \
         image_url   TEXT, \
         created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')), \
         updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) \
     )",
    "CREATE INDEX IF NOT EXISTS idx_destinations_rank ON destinations (rank)",
];

/// Destination storage in a local SQLite file.
pub struct SqliteDestinationRepo {
    pool: SqlitePool,
}

impl SqliteDestinationRepo {
    /// Open (creating if missing) the database at `path`.
    ///
    /// [`IN_MEMORY`] opens a fresh private in-memory database, which lives
    /// exactly as long as this repo.
    pub async fn connect(path: &str) -> Result<Self, sqlx::Error> {
        let options = if path == IN_MEMORY {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DestinationBackend for SqliteDestinationRepo {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations ORDER BY rank ASC, id ASC");
        sqlx::query_as::<_, Destination>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = ?1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, dto: &CreateDestination) -> Result<Destination, sqlx::Error> {
        let now = now_micros();
        let query = format!(
            "INSERT INTO destinations \
                 (rank, destination, country, latitude, longitude, \
                  reason, budget, timeline, image_url, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(dto.rank)
            .bind(&dto.destination)
            .bind(&dto.country)
            .bind(dto.latitude)
            .bind(dto.longitude)
            .bind(&dto.reason)
            .bind(&dto.budget)
            .bind(&dto.timeline)
            .bind(&dto.image_url)
            .bind(now)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(
        &self,
        id: DbId,
        dto: &UpdateDestination,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM destinations WHERE id = ?1");
        let Some(existing) = sqlx::query_as::<_, Destination>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = dto.apply_to(&existing);
        let updated_at = next_updated_at(existing.updated_at, now_micros());

        let query = format!(
            "UPDATE destinations SET \
                 rank = ?2, destination = ?3, country = ?4, \
                 latitude = ?5, longitude = ?6, reason = ?7, \
                 budget = ?8, timeline = ?9, image_url = ?10, updated_at = ?11 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .bind(merged.rank)
            .bind(&merged.destination)
            .bind(&merged.country)
            .bind(merged.latitude)
            .bind(merged.longitude)
            .bind(&merged.reason)
            .bind(&merged.budget)
            .bind(&merged.timeline)
            .bind(&merged.image_url)
            .bind(updated_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_ranks(&self, ranks: &[RankAssignment]) -> Result<(), sqlx::Error> {
        let now = now_micros();
        let mut tx = self.pool.begin().await?;

        for assignment in ranks {
            // Timestamps are stored as text, so the "strictly later" rule is
            // computed here rather than in SQL.
            let previous = sqlx::query_scalar::<_, Timestamp>(
                "SELECT updated_at FROM destinations WHERE id = ?1",
            )
            .bind(assignment.id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(previous) = previous else {
                continue;
            };

            sqlx::query("UPDATE destinations SET rank = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(assignment.id)
                .bind(assignment.rank)
                .bind(next_updated_at(previous, now))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
