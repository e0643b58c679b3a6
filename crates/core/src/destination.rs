//! Destination field defaults and validation helpers.
//!
//! Shared by the HTTP layer (request validation, defaulting) and the storage
//! backends (schema defaults, timestamp refresh).

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Entity name used in `CoreError::NotFound`.
pub const ENTITY_NAME: &str = "Destination";

/// Rank assigned when a create request omits one.
pub const DEFAULT_RANK: i32 = 1;

/// Timeline tag for destinations with no planned travel window.
pub const TIMELINE_UNSCHEDULED: &str = "unscheduled";

/// Coordinate used when a create request omits latitude or longitude.
pub const DEFAULT_COORDINATE: f64 = 0.0;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a required text field is present and not blank.
///
/// Returns the trimmed value so callers store what was validated.
pub fn validate_required_text(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Validate the two fields every create/replace request must carry.
pub fn validate_place(
    destination: Option<&str>,
    country: Option<&str>,
) -> Result<(String, String), CoreError> {
    let destination = validate_required_text(destination, "destination")?;
    let country = validate_required_text(country, "country")?;
    Ok((destination, country))
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Compute the `updated_at` value for a write on a record last touched at
/// `previous`.
///
/// The result is never earlier than `now` and always strictly after
/// `previous`, so `updated_at` increases on every write even when the clock
/// resolution is coarser than the interval between writes.
pub fn next_updated_at(previous: Timestamp, now: Timestamp) -> Timestamp {
    let floor = previous + Duration::microseconds(1);
    if now > floor {
        now
    } else {
        floor
    }
}

/// Current time truncated to microseconds, the finest precision both
/// backends persist.
pub fn now_micros() -> Timestamp {
    let now = chrono::Utc::now();
    let micros = now.timestamp_micros();
    chrono::DateTime::from_timestamp_micros(micros).unwrap_or(now)
}
