//! Daily prayer-time records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoundaryError, ClockTime, ClockTimeError, PrayerName};

/// One day's row from the prayer-times table.
///
/// Times are kept as the raw `"HH:mm"` strings the service sent. They are
/// parsed when a computation needs them so a malformed value surfaces as an
/// error naming the field instead of being silently replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTimes {
    pub date: NaiveDate,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyTimesError {
    #[error("{date}: invalid {field} time: {source}")]
    InvalidTime {
        date: NaiveDate,
        field: PrayerName,
        source: ClockTimeError,
    },
    #[error("{date}: {later} ({later_time}) is not after {earlier} ({earlier_time})")]
    OutOfOrder {
        date: NaiveDate,
        earlier: PrayerName,
        earlier_time: ClockTime,
        later: PrayerName,
        later_time: ClockTime,
    },
}

impl DailyTimes {
    #[must_use]
    pub fn raw(&self, prayer: PrayerName) -> &str {
        match prayer {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Sunrise => &self.sunrise,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        }
    }

    /// Parse one slot, naming it in the error on failure.
    pub fn time(&self, prayer: PrayerName) -> Result<ClockTime, BoundaryError> {
        let raw = self.raw(prayer);
        ClockTime::parse(raw).map_err(|_| BoundaryError::InvalidTimeFormat {
            field: prayer,
            value: raw.to_string(),
        })
    }

    /// Check that every slot parses and the slots are strictly ascending.
    pub fn validate(&self) -> Result<(), DailyTimesError> {
        let mut previous: Option<(PrayerName, ClockTime)> = None;
        for prayer in PrayerName::ALL {
            let time =
                ClockTime::parse(self.raw(prayer)).map_err(|source| DailyTimesError::InvalidTime {
                    date: self.date,
                    field: prayer,
                    source,
                })?;
            if let Some((earlier, earlier_time)) = previous
                && time <= earlier_time
            {
                return Err(DailyTimesError::OutOfOrder {
                    date: self.date,
                    earlier,
                    earlier_time,
                    later: prayer,
                    later_time: time,
                });
            }
            previous = Some((prayer, time));
        }
        Ok(())
    }
}
