//! Duration rounding and fee computation for check-out.

use time::OffsetDateTime;

const NANOS_PER_HOUR: i128 = 3_600 * 1_000_000_000;

/// Hours billed for a stay: every started hour counts, with a one hour
/// minimum. A stay that ends before it began (clock skew) bills one hour.
pub fn billable_hours(entry: OffsetDateTime, exit: OffsetDateTime) -> i64 {
    let nanos = (exit - entry).whole_nanoseconds();
    if nanos <= 0 {
        return 1;
    }
    let hours = (nanos + NANOS_PER_HOUR - 1) / NANOS_PER_HOUR;
    i64::try_from(hours).unwrap_or(i64::MAX).max(1)
}

pub fn fee_for(hours: i64, hourly_rate: i64) -> i64 {
    hours.saturating_mul(hourly_rate)
}
