//! PostgreSQL backend for the `destinations` table.
//!
//! Coordinates are stored as unconstrained `NUMERIC`, which the driver hands
//! back as a decimal rather than a float. Every select and `RETURNING` list
//! therefore casts them to `float8` so rows decode straight into `f64`.
//! No precision or scale is declared: any finite `f64` the local backend
//! accepts must round-trip here too.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use wishmap_core::destination::{next_updated_at, now_micros};
use wishmap_core::ranking::RankAssignment;
use wishmap_core::types::DbId;

use crate::backend::{BackendKind, DestinationBackend};
use crate::models::destination::{CreateDestination, Destination, UpdateDestination};

/// Maximum pooled connections to the hosted database.
const MAX_CONNECTIONS: u32 = 10;

/// Column list for `destinations` queries.
const COLUMNS: &str = "\
    id, rank, destination, country, \
    latitude::float8 AS latitude, longitude::float8 AS longitude, \
    reason, budget, timeline, image_url, created_at, updated_at";

/// Idempotent DDL, one statement per entry.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS destinations ( \
         id          BIGSERIAL PRIMARY KEY, \
         rank        INTEGER NOT NULL DEFAULT 1 CHECK (rank >= 1), \
         destination TEXT NOT NULL, \
         country     TEXT NOT NULL, \
         latitude    NUMERIC NOT NULL, \
         longitude   NUMERIC NOT NULL, \
         reason      TEXT NOT NULL DEFAULT '', \
         budget      TEXT NOT NULL DEFAULT '', \
         timeline    TEXT NOT NULL DEFAULT 'unscheduled', \
         image_url   TEXT, \
         created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
         updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW() \
     )",
    "CREATE INDEX IF NOT EXISTS idx_destinations_rank ON destinations (rank)",
    // Tables created with `NUMERIC(9, 6)` coordinates are widened in place.
    "ALTER TABLE destinations \
         ALTER COLUMN latitude TYPE NUMERIC, \
         ALTER COLUMN longitude TYPE NUMERIC",
];

/// Destination storage on a hosted PostgreSQL database.
pub struct PgDestinationRepo {
    pool: PgPool,
}

impl PgDestinationRepo {
    /// Wrap an existing pool (used by tests that own the pool).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a connection pool from a database URL.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DestinationBackend for PgDestinationRepo {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
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
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = $1");
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
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) \
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

        let select = format!("SELECT {COLUMNS} FROM destinations WHERE id = $1 FOR UPDATE");
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
                 rank = $2, destination = $3, country = $4, \
                 latitude = $5, longitude = $6, reason = $7, \
                 budget = $8, timeline = $9, image_url = $10, updated_at = $11 \
             WHERE id = $1 \
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
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_ranks(&self, ranks: &[RankAssignment]) -> Result<(), sqlx::Error> {
        let now = now_micros();
        let mut tx = self.pool.begin().await?;

        for assignment in ranks {
            sqlx::query(
                "UPDATE destinations \
                 SET rank = $2, updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond') \
                 WHERE id = $1",
            )
            .bind(assignment.id)
            .bind(assignment.rank)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
