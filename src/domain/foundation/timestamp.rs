//! UTC instants for pull request creation and merge.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
/// PostgreSQL `TIMESTAMPTZ` keeps microseconds.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// A moment in UTC. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time at storage precision, so a value returned before a write
    /// equals the one read back after it.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(STORED_SUBSEC_DIGITS))
    }

    /// Wraps a value loaded from storage.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Hours from `earlier` to `self`, with millisecond precision.
    ///
    /// Negative when `earlier` is actually later; callers averaging merge
    /// times rely on `merged_at >= created_at`.
    pub fn hours_since(&self, earlier: &Timestamp) -> f64 {
        self.0.signed_duration_since(earlier.0).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    /// Shifted by `minutes`, which may be negative.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }
}
