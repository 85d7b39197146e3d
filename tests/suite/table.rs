//! Loading upstream snapshots from disk into a table.

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tempfile::tempdir;

use vakit_core::DailyTimesSource;
use vakit_source::{SourceError, TableSnapshot};
use vakit_types::{DailyTimesError, PrayerName};

use crate::common::{api_row, api_rows, date, write_json};

#[test]
fn envelope_snapshot_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = write_json(
        dir.path(),
        "times.json",
        &json!({ "fetched_at": "2025-03-01T06:00:00Z", "records": api_rows(31) }),
    );

    let snapshot = TableSnapshot::load(&path).unwrap();
    assert!(snapshot.is_fresh(Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()));
    assert!(!snapshot.is_fresh(Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap()));

    let table = snapshot.into_table().unwrap();
    assert_eq!(table.len(), 31);
    assert_eq!(table.first_date(), Some(date(1)));
    assert_eq!(table.last_date(), Some(date(31)));

    let day = table.daily_times(date(10)).unwrap();
    assert_eq!(day.fajr, "05:22");
    assert_eq!(day.maghrib, "18:39");
}

#[test]
fn bare_array_is_accepted_but_stale() {
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "raw.json", &Value::Array(api_rows(3)));

    let snapshot = TableSnapshot::load(&path).unwrap();
    assert!(!snapshot.is_fresh(Utc::now()));
    assert_eq!(snapshot.into_table().unwrap().len(), 3);
}

#[test]
fn duplicate_day_is_rejected() {
    let mut rows = api_rows(3);
    rows.push(api_row(date(2), 1));
    let raw = Value::Array(rows).to_string();

    let err = TableSnapshot::from_json(&raw)
        .unwrap()
        .into_table()
        .unwrap_err();
    assert!(matches!(err, SourceError::DuplicateDate(d) if d == date(2)));
}

#[test]
fn unordered_slots_are_rejected() {
    let mut row = api_row(date(5), 4);
    row["Aksam"] = json!("12:00");
    let raw = Value::Array(vec![row]).to_string();

    let err = TableSnapshot::from_json(&raw)
        .unwrap()
        .into_table()
        .unwrap_err();
    assert!(matches!(
        err,
        SourceError::InvalidDay(DailyTimesError::OutOfOrder {
            later: PrayerName::Maghrib,
            ..
        })
    ));
}

#[test]
fn malformed_slot_is_rejected_with_field_name() {
    let mut row = api_row(date(5), 4);
    row["Imsak"] = json!("5:18");
    let raw = Value::Array(vec![row]).to_string();

    let err = TableSnapshot::from_json(&raw)
        .unwrap()
        .into_table()
        .unwrap_err();
    assert!(matches!(
        err,
        SourceError::InvalidDay(DailyTimesError::InvalidTime {
            field: PrayerName::Fajr,
            ..
        })
    ));
}

#[test]
fn row_without_iso_date_fails_to_decode() {
    let mut row = api_row(date(5), 4);
    row.as_object_mut().unwrap().remove("MiladiTarihUzunIso8601");
    let raw = Value::Array(vec![row]).to_string();

    assert!(matches!(
        TableSnapshot::from_json(&raw),
        Err(SourceError::Decode(_))
    ));
}

#[test]
fn long_dates_survive_into_the_table() {
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "times.json", &Value::Array(api_rows(12)));
    let table = TableSnapshot::load(&path).unwrap().into_table().unwrap();

    let labels = table.labels(date(10)).unwrap();
    assert_eq!(labels.gregorian.as_deref(), Some("10 March 2025"));
    assert_eq!(labels.hijri.as_deref(), Some("Ramazan 1446"));
    assert_eq!(table.labels(date(20)), None);
}
