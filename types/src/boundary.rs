//! Fasting boundaries and the result of locating the next one.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ClockTime, PrayerName};

/// Which fasting boundary a countdown is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// Counting down to today's maghrib.
    ToIftar,
    /// Counting down to tomorrow's fajr.
    ToSahur,
}

impl BoundaryKind {
    /// The record slot this boundary is read from.
    #[must_use]
    pub const fn prayer(self) -> PrayerName {
        match self {
            BoundaryKind::ToIftar => PrayerName::Maghrib,
            BoundaryKind::ToSahur => PrayerName::Fajr,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BoundaryKind::ToIftar => "iftar",
            BoundaryKind::ToSahur => "sahur",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The next fasting boundary relative to some instant.
///
/// Never persisted; callers recompute it whenever the countdown runs out.
#[derive(Debug, Clone)]
pub struct BoundaryResult<Tz: TimeZone> {
    pub target_instant: DateTime<Tz>,
    pub kind: BoundaryKind,
    /// The `"HH:mm"` value of the slot being counted to.
    pub source_time: ClockTime,
}

// Manual impl: `chrono::Local` is not `PartialEq`, but its instants are.
impl<Tz: TimeZone> PartialEq for BoundaryResult<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.source_time == other.source_time
            && self.target_instant == other.target_instant
    }
}

impl<Tz: TimeZone> Eq for BoundaryResult<Tz> {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// The record for `date` is not in the table.
    #[error("no prayer times available for {date}")]
    MissingData { date: NaiveDate },
    #[error("invalid {field} time {value:?}: expected HH:mm")]
    InvalidTimeFormat { field: PrayerName, value: String },
    /// The wall-clock time falls in a DST gap on `date`.
    #[error("{time} does not exist on {date} in the local time zone")]
    NonexistentLocalTime { date: NaiveDate, time: ClockTime },
}

impl BoundaryError {
    /// Whether refreshing the table could resolve this error.
    #[must_use]
    pub const fn is_missing_data(&self) -> bool {
        matches!(self, BoundaryError::MissingData { .. })
    }
}
