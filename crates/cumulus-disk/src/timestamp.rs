//! Remote timestamp parsing and normalization
//!
//! The disk service reports modification times as naive local strings at a
//! fixed UTC offset (`"2024-01-01T10:00:00"`), while the local collector
//! produces absolute epoch seconds from filesystem mtimes. Comparing the
//! two directly would mis-trigger uploads and deletes purely from timezone
//! skew, so every remote timestamp is normalized onto the collector's
//! absolute epoch basis before it enters a snapshot: parse the naive
//! calendar components, then add the host's own UTC offset.

use chrono::{Local, NaiveDateTime, Offset};

/// Format of the service's `modified` field: ISO-8601-like, no offset
const REMOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses the service's textual timestamp into calendar components
pub fn parse_remote_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, REMOTE_TIMESTAMP_FORMAT)
}

/// Normalizes a naive remote timestamp to absolute epoch seconds
///
/// Pure function: reading the naive components as if they were UTC and
/// adding `offset_hours` yields the instant on the same epoch basis the
/// local collector uses.
pub fn normalize_to_epoch(naive: NaiveDateTime, offset_hours: i64) -> i64 {
    naive.and_utc().timestamp() + offset_hours * 3600
}

/// The host's own UTC offset in whole hours
///
/// Read once per listing so every entry of a snapshot is normalized with
/// the same offset.
pub fn host_utc_offset_hours() -> i64 {
    i64::from(Local::now().offset().fix().local_minus_utc()) / 3600
}
