//! Serde model of one record from the upstream prayer-times service.
//!
//! The service publishes a month or so of rows per district with Turkish
//! field names. The six slot times and the Gregorian ISO date build a
//! [`DailyTimes`]; the two long date strings are printed by `--today`.
//! Every other upstream field is ignored on decode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vakit_types::DailyTimes;

use crate::SourceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRecord {
    #[serde(rename = "Imsak")]
    pub fajr: String,
    #[serde(rename = "Gunes")]
    pub sunrise: String,
    #[serde(rename = "Ogle")]
    pub dhuhr: String,
    #[serde(rename = "Ikindi")]
    pub asr: String,
    #[serde(rename = "Aksam")]
    pub maghrib: String,
    #[serde(rename = "Yatsi")]
    pub isha: String,

    /// e.g. `2025-03-10T00:00:00.0000000+03:00`
    #[serde(rename = "MiladiTarihUzunIso8601")]
    pub gregorian_long_iso: String,
    /// e.g. `10 Mart 2025 Pazartesi`
    #[serde(rename = "MiladiTarihUzun", default, skip_serializing_if = "Option::is_none")]
    pub gregorian_long: Option<String>,
    /// e.g. `10 Ramazan 1446`
    #[serde(rename = "HicriTarihUzun", default, skip_serializing_if = "Option::is_none")]
    pub hijri_long: Option<String>,
}

/// Human-readable dates for one day, as published upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateLabels {
    pub gregorian: Option<String>,
    pub hijri: Option<String>,
}

impl DateLabels {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gregorian.is_none() && self.hijri.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ApiRecord {
    /// The Gregorian day this row applies to, from the date part of the ISO stamp.
    pub fn date(&self) -> Result<NaiveDate, SourceError> {
        let day = self
            .gregorian_long_iso
            .split('T')
            .next()
            .unwrap_or_default();
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| SourceError::InvalidDate(self.gregorian_long_iso.clone()))
    }

    /// Slot times are copied verbatim; they are validated by the table.
    pub fn into_daily_times(self) -> Result<DailyTimes, SourceError> {
        self.into_parts().map(|(day, _)| day)
    }

    /// The day's times plus its display dates. Blank labels become `None`.
    pub fn into_parts(self) -> Result<(DailyTimes, DateLabels), SourceError> {
        let date = self.date()?;
        let labels = DateLabels {
            gregorian: non_blank(self.gregorian_long),
            hijri: non_blank(self.hijri_long),
        };
        let day = DailyTimes {
            date,
            fajr: self.fajr,
            sunrise: self.sunrise,
            dhuhr: self.dhuhr,
            asr: self.asr,
            maghrib: self.maghrib,
            isha: self.isha,
        };
        Ok((day, labels))
    }
}
