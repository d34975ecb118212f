//! Timestamp deriver.

use chrono::{DateTime, Utc};

use crate::hash::{hash64, secondary_hash64};

/// 2009-11-10T23:00:00Z, the lower bound of derived timestamps.
pub const BASE_UNIX_SECS: i64 = 1_257_894_000;

/// Width of the derivation window in seconds (176,545 hours), ending at
/// 2030-01-01T00:00:00Z.
pub const SPAN_SECS: u64 = 176_545 * 3_600;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Timestamp in `[2009-11-10T23:00:00Z, 2030-01-01T00:00:00Z)`.
///
/// Seconds come from the primary hash, nanoseconds from the independently
/// keyed secondary hash.
pub fn time<S: AsRef<str>>(keys: &[S]) -> DateTime<Utc> {
    let secs = BASE_UNIX_SECS + (hash64(keys) % SPAN_SECS) as i64;
    let nanos = (secondary_hash64(keys) % NANOS_PER_SEC) as u32;
    // Both components are in range by construction.
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}
