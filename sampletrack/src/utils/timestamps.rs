//! Timestamp utilities.
//!
//! The upstream LIMS transports record times as Unix epoch milliseconds;
//! internally everything is `chrono::DateTime<Utc>`.

use chrono::{DateTime, TimeZone, Utc};

/// The timestamp type used throughout the engine.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Converts a Unix epoch-millisecond value into a UTC timestamp.
///
/// Returns `None` for values outside the representable range.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}
