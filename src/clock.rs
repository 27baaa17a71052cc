//! Time source for entry/exit stamps.

use std::fmt::Debug;
use std::sync::Mutex;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::DbErr;
use time::{Duration, OffsetDateTime};

/// Source of "now" for the session coordinator.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
///
/// ```
/// use seaorm_parking_lot::{Clock, ManualClock};
/// use time::{Duration, OffsetDateTime};
///
/// let clock = ManualClock::new(OffsetDateTime::UNIX_EPOCH);
/// clock.advance(Duration::minutes(61));
/// assert_eq!(clock.now().unix_timestamp(), 61 * 60);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, to: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Converts a `time` timestamp into the chrono type SeaORM stores.
pub(crate) fn to_db_time(time: OffsetDateTime) -> Result<DateTimeWithTimeZone, DbErr> {
    chrono::DateTime::from_timestamp(time.unix_timestamp(), time.nanosecond())
        .map(Into::into)
        .ok_or_else(|| DbErr::Type(format!("timestamp {time} is out of range")))
}

/// Converts a stored timestamp back into UTC `time`.
pub(crate) fn from_db_time(stored: DateTimeWithTimeZone) -> Result<OffsetDateTime, DbErr> {
    let secs = OffsetDateTime::from_unix_timestamp(stored.timestamp())
        .map_err(|e| DbErr::Type(e.to_string()))?;
    Ok(secs + Duration::nanoseconds(i64::from(stored.timestamp_subsec_nanos())))
}
