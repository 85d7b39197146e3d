//! Next fasting boundary calculation.
//!
//! Given today's and tomorrow's records and the current instant, decide
//! whether the countdown runs to today's maghrib (iftar) or tomorrow's fajr
//! (sahur). The boundary instant itself already counts as passed, so a
//! countdown never shows a zero or negative duration to a boundary that has
//! just been reached.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone};

use vakit_types::{BoundaryError, BoundaryKind, BoundaryResult, ClockTime, DailyTimes, PrayerName};

/// Resolve a calendar date and wall-clock time into an instant in `tz`.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
/// Local times inside a DST gap do not exist and are reported as such.
pub fn combine<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: ClockTime,
) -> Result<DateTime<Tz>, BoundaryError> {
    tz.from_local_datetime(&date.and_time(time.as_naive()))
        .earliest()
        .ok_or(BoundaryError::NonexistentLocalTime { date, time })
}

/// The calendar day after `date`, or `None` past the last representable date.
///
/// Always date arithmetic, never `+ 24h`, so 23- and 25-hour days are handled.
#[must_use]
pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

/// Locate the next fasting boundary after `now`.
///
/// `today` must be the record for `now`'s local date and `tomorrow` the record
/// for the day after it. `tomorrow` is only consulted once today's maghrib
/// has passed. A record for any other date is treated as missing rather than
/// risking a countdown to a boundary that is already behind us.
pub fn compute_next_boundary<Tz: TimeZone>(
    now: &DateTime<Tz>,
    today: Option<&DailyTimes>,
    tomorrow: Option<&DailyTimes>,
) -> Result<BoundaryResult<Tz>, BoundaryError> {
    let date = now.date_naive();
    let today = today
        .filter(|record| record.date == date)
        .ok_or(BoundaryError::MissingData { date })?;
    let tz = now.timezone();

    let maghrib = today.time(PrayerName::Maghrib)?;
    let iftar = combine(&tz, today.date, maghrib)?;
    if *now < iftar {
        return Ok(BoundaryResult {
            target_instant: iftar,
            kind: BoundaryKind::ToIftar,
            source_time: maghrib,
        });
    }

    let expected = next_day(today.date).ok_or(BoundaryError::MissingData { date: today.date })?;
    let tomorrow = tomorrow
        .filter(|record| record.date == expected)
        .ok_or(BoundaryError::MissingData { date: expected })?;

    let fajr = tomorrow.time(PrayerName::Fajr)?;
    let sahur = combine(&tz, tomorrow.date, fajr)?;
    Ok(BoundaryResult {
        target_instant: sahur,
        kind: BoundaryKind::ToSahur,
        source_time: fajr,
    })
}

/// Time left until `target`, clamped at zero.
///
/// The clamp covers the tick where `now` has crossed `target` but the caller
/// has not recomputed yet.
#[must_use]
pub fn remaining_duration<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> TimeDelta {
    target
        .clone()
        .signed_duration_since(now)
        .max(TimeDelta::zero())
}
