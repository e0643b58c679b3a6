use std::path::PathBuf;
use std::str::FromStr;

use wishmap_db::StorageConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the Nominatim-compatible geocoder.
    pub geocoder_url: String,
    /// Directory holding the map front end, served for unmatched paths.
    pub static_dir: Option<PathBuf>,
    /// Storage backend selection.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                               |
    /// |------------------------|---------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                             |
    /// | `PORT`                 | `3000`                                |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                  |
    /// | `GEOCODER_URL`         | `https://nominatim.openstreetmap.org` |
    /// | `STATIC_DIR`           | unset                                 |
    /// | `DATABASE_URL`         | unset (local SQLite backend)          |
    /// | `SQLITE_PATH`          | `wishlist.db`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_var(&lookup, "PORT", 3000u16, "u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64, "u64")?;

        let geocoder_url = lookup("GEOCODER_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| wishmap_geocode::DEFAULT_BASE_URL.into());

        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let storage = StorageConfig::from_lookup(&lookup);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            geocoder_url,
            static_dir,
            storage,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
