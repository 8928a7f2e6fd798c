//! Wall-clock helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in nanoseconds.
#[inline]
pub fn unix_nanos() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before epoch");
    now.as_secs() as i64 * 1_000_000_000 + now.subsec_nanos() as i64
}
