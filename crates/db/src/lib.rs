//! Destination persistence with interchangeable backends.
//!
//! [`open_store`] connects to whichever backend [`StorageConfig`] selects,
//! creates the schema, and returns the [`DestinationStore`] facade.

pub mod backend;
pub mod config;
pub mod models;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use backend::{BackendKind, DestinationBackend};
pub use config::StorageConfig;
pub use store::DestinationStore;

use repositories::{PgDestinationRepo, SqliteDestinationRepo};

/// Connect to the configured backend and make sure the table exists.
pub async fn open_store(config: &StorageConfig) -> Result<DestinationStore, sqlx::Error> {
    let backend: Arc<dyn DestinationBackend> = match config {
        StorageConfig::Hosted { database_url } => {
            Arc::new(PgDestinationRepo::connect(database_url).await?)
        }
        StorageConfig::Local { path } => Arc::new(SqliteDestinationRepo::connect(path).await?),
    };

    backend.ensure_schema().await?;
    tracing::info!(backend = %backend.kind(), "Destination store ready");

    Ok(DestinationStore::new(backend))
}
