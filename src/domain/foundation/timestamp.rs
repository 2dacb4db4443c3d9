//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ordering_follows_wall_clock() {
        let earlier = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let later = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(earlier.is_before(&later));
        assert!(!later.is_before(&earlier));
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-01-02T03:04:05Z\"");
    }
}
