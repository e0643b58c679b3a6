//! Storage backends for the `destinations` table.
//!
//! Each backend implements [`DestinationBackend`](crate::backend::DestinationBackend);
//! the rest of the workspace only ever talks to the
//! [`DestinationStore`](crate::store::DestinationStore) facade.

pub mod pg_destination_repo;
pub mod sqlite_destination_repo;

pub use pg_destination_repo::PgDestinationRepo;
pub use sqlite_destination_repo::SqliteDestinationRepo;
