//! Backend selection.
//!
//! The presence of `DATABASE_URL` is the only signal that picks the hosted
//! backend; everything else falls back to a local SQLite file. The choice is
//! made once at startup.

use std::fmt;

/// Default location of the local database file.
pub const DEFAULT_SQLITE_PATH: &str = "wishlist.db";

/// Where destinations are stored for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Hosted PostgreSQL database.
    Hosted { database_url: String },
    /// Local SQLite file (or `:memory:`).
    Local { path: String },
}

impl StorageConfig {
    /// Read the storage selection from the process environment.
    ///
    /// | Env Var        | Effect                                   |
    /// |----------------|------------------------------------------|
    /// | `DATABASE_URL` | when set and non-empty, use PostgreSQL   |
    /// | `SQLITE_PATH`  | local file path (default `wishlist.db`)  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(database_url) => StorageConfig::Hosted { database_url },
            None => StorageConfig::Local {
                path: lookup("SQLITE_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            },
        }
    }
}

// Connection strings carry credentials; never print them.
impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageConfig::Hosted { .. } => f
                .debug_struct("Hosted")
                .field("database_url", &"<redacted>")
                .finish(),
            StorageConfig::Local { path } => f.debug_struct("Local").field("path", path).finish(),
        }
    }
}
