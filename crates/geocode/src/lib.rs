//! HTTP client for the external place-name geocoder.
//!
//! Talks to a Nominatim-compatible `/search` endpoint and reduces the
//! response to a single best match. No retries and no caching: every lookup
//! is one upstream request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Public Nominatim instance used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// HTTP request timeout for a single lookup.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = concat!("wishmap/", env!("CARGO_PKG_VERSION"));

/// Best match for a place lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeMatch {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// One entry of the `/search?format=json` response. Coordinates arrive as
/// strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// Errors from the geocoding layer.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The geocoder returned a non-2xx status code.
    #[error("Geocoder API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A result carried a coordinate that is not a number.
    #[error("Invalid coordinate in geocoder response: {0}")]
    InvalidCoordinate(String),
}

/// Geocoding client for a single upstream instance.
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a client for a Nominatim-compatible instance.
    ///
    /// * `base_url` - e.g. `https://nominatim.openstreetmap.org`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up `place` in `country`.
    ///
    /// Returns `Ok(None)` when the geocoder has no match.
    pub async fn lookup(
        &self,
        place: &str,
        country: &str,
    ) -> Result<Option<GeocodeMatch>, GeocodeError> {
        let q = search_query(place, country);
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", q.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<SearchResult> = response.json().await?;
        let best = first_match(results)?;

        tracing::debug!(place, country, found = best.is_some(), "Geocode lookup finished");
        Ok(best)
    }
}

/// Free-text query sent upstream.
fn search_query(place: &str, country: &str) -> String {
    format!("{}, {}", place.trim(), country.trim())
}

/// Reduce a result list to its first entry with numeric coordinates.
fn first_match(results: Vec<SearchResult>) -> Result<Option<GeocodeMatch>, GeocodeError> {
    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(GeocodeMatch {
        latitude: parse_coordinate(&first.lat)?,
        longitude: parse_coordinate(&first.lon)?,
        display_name: first.display_name,
    }))
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(raw.to_string()))
}
