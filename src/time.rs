use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::ops::Deref;

/// Timestamp normalised to UTC, carried on the wire as integer Unix seconds.
///
/// Naive date-times are taken to already be in UTC; zoned ones are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub DateTime<Utc>);

impl Time {
    /// Create a new Time from a DateTime
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    /// Create a Time from a unix timestamp in seconds
    pub fn from_unix(unix: i64) -> Option<Self> {
        Utc.timestamp_opt(unix, 0).single().map(Time)
    }

    /// Get the unix timestamp in seconds
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Time {
    fn from(dt: DateTime<Tz>) -> Self {
        Time(dt.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for Time {
    fn from(dt: NaiveDateTime) -> Self {
        Time(Utc.from_utc_datetime(&dt))
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(t: Time) -> Self {
        t.0
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.unix())
    }
}
