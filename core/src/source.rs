//! Boundary between the calculator and whatever owns the time table.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};

use vakit_types::{BoundaryError, BoundaryResult, DailyTimes};

use crate::calculator::{compute_next_boundary, next_day};

/// Read access to daily records keyed by calendar date.
///
/// Implementations are immutable snapshots; refreshing the table means
/// handing a new snapshot to the caller.
pub trait DailyTimesSource {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes>;
}

impl DailyTimesSource for [DailyTimes] {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        self.iter().find(|record| record.date == date)
    }
}

impl DailyTimesSource for Vec<DailyTimes> {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        self.as_slice().daily_times(date)
    }
}

impl DailyTimesSource for BTreeMap<NaiveDate, DailyTimes> {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        self.get(&date)
    }
}

impl<S: DailyTimesSource + ?Sized> DailyTimesSource for &S {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        (**self).daily_times(date)
    }
}

impl<S: DailyTimesSource + ?Sized> DailyTimesSource for Arc<S> {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        self.as_ref().daily_times(date)
    }
}

/// Look up today's and tomorrow's records for `now` and compute the next boundary.
pub fn next_boundary_from_source<Tz, S>(
    now: &DateTime<Tz>,
    source: &S,
) -> Result<BoundaryResult<Tz>, BoundaryError>
where
    Tz: TimeZone,
    S: DailyTimesSource + ?Sized,
{
    let date = now.date_naive();
    let today = source.daily_times(date);
    let tomorrow = next_day(date).and_then(|next| source.daily_times(next));
    compute_next_boundary(now, today, tomorrow)
}
