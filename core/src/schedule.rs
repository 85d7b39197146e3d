//! The six daily slots resolved to instants, for prayer-list style surfaces.

use chrono::{DateTime, TimeZone};

use vakit_types::{BoundaryError, ClockTime, DailyTimes, PrayerName};

use crate::calculator::combine;

#[derive(Debug, Clone)]
pub struct PrayerSlot<Tz: TimeZone> {
    pub prayer: PrayerName,
    pub time: ClockTime,
    pub instant: DateTime<Tz>,
}

/// One day's slots in daily order.
#[derive(Debug, Clone)]
pub struct PrayerSchedule<Tz: TimeZone> {
    slots: Vec<PrayerSlot<Tz>>,
}

impl<Tz: TimeZone> PrayerSchedule<Tz> {
    /// Resolve every slot of `day` in `tz`. Fails on the first bad slot.
    pub fn resolve(tz: &Tz, day: &DailyTimes) -> Result<Self, BoundaryError> {
        let slots = PrayerName::ALL
            .into_iter()
            .map(|prayer| {
                let time = day.time(prayer)?;
                let instant = combine(tz, day.date, time)?;
                Ok(PrayerSlot {
                    prayer,
                    time,
                    instant,
                })
            })
            .collect::<Result<Vec<_>, BoundaryError>>()?;
        Ok(Self { slots })
    }

    #[must_use]
    pub fn slots(&self) -> &[PrayerSlot<Tz>] {
        &self.slots
    }

    /// The slot in progress at `now`: the last one already reached.
    ///
    /// Reaching a slot's instant counts as being in it. `None` before fajr.
    #[must_use]
    pub fn current(&self, now: &DateTime<Tz>) -> Option<&PrayerSlot<Tz>> {
        self.slots.iter().rev().find(|slot| slot.instant <= *now)
    }

    /// The first slot strictly after `now`. `None` once isha has begun.
    #[must_use]
    pub fn next(&self, now: &DateTime<Tz>) -> Option<&PrayerSlot<Tz>> {
        self.slots.iter().find(|slot| slot.instant > *now)
    }
}
