//! Shared test utilities and fixtures
//!
//! Builds prayer-time tables in the upstream JSON shape so the suite goes
//! through the same decode path as the binary.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use chrono_tz::Europe::Istanbul;
use chrono_tz::Tz;
use serde_json::{Value, json};

use vakit_source::{TableSnapshot, TimeTable};

/// First day of the fixture month: 2025-03-01, a Saturday.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// Istanbul wall-clock instant in March 2025.
pub fn istanbul(day: u32, h: u32, m: u32, s: u32) -> DateTime<Tz> {
    Istanbul.with_ymd_and_hms(2025, 3, day, h, m, s).unwrap()
}

fn hm(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// One upstream row. Fajr moves two minutes earlier and maghrib one
/// minute later each day, roughly like Istanbul in March.
pub fn api_row(date: NaiveDate, offset: u32) -> Value {
    let fajr = 5 * 60 + 40 - offset * 2;
    let maghrib = 18 * 60 + 30 + offset;
    json!({
        "Imsak": hm(fajr),
        "Gunes": hm(fajr + 85),
        "Ogle": "13:18",
        "Ikindi": "16:37",
        "Aksam": hm(maghrib),
        "Yatsi": hm(maghrib + 80),
        "MiladiTarihKisa": date.format("%d.%m.%Y").to_string(),
        "MiladiTarihUzun": date.format("%-d %B %Y").to_string(),
        "MiladiTarihUzunIso8601": format!("{}T00:00:00.0000000+03:00", date),
        "HicriTarihUzun": "Ramazan 1446",
        "GreenwichOrtalamaZamani": 3.0
    })
}

/// `days` consecutive rows starting at [`start_date`].
pub fn api_rows(days: u32) -> Vec<Value> {
    (0..days)
        .map(|offset| {
            let date = start_date()
                .checked_add_days(Days::new(u64::from(offset)))
                .unwrap();
            api_row(date, offset)
        })
        .collect()
}

pub fn march_table() -> TimeTable {
    table_of(31)
}

/// The first `days` days of the fixture month.
pub fn table_of(days: u32) -> TimeTable {
    let raw = Value::Array(api_rows(days)).to_string();
    TableSnapshot::from_json(&raw).unwrap().into_table().unwrap()
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
