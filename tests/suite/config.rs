//! Config file, env overrides and the table they point at, wired together.

use std::fs;
use std::time::Duration;

use chrono_tz::Tz;
use serde_json::{Value, json};
use tempfile::tempdir;

use vakit_config::{ENV_LANG, ENV_TABLE, ENV_TZ, VakitConfig};
use vakit_core::next_boundary_from_source;
use vakit_source::TableSnapshot;
use vakit_types::{BoundaryKind, Language};

use crate::common::{api_rows, istanbul, write_json};

#[test]
fn config_points_at_a_loadable_table() {
    let dir = tempdir().unwrap();
    let table_path = write_json(
        dir.path(),
        "times.json",
        &json!({ "fetched_at": "2025-03-01T06:00:00Z", "records": api_rows(31) }),
    );
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[app]\nlanguage = \"tr\"\ntimezone = \"Europe/Istanbul\"\ntable = {:?}\n",
            table_path.display().to_string()
        ),
    )
    .unwrap();

    let config = VakitConfig::load_from(&config_path).unwrap().unwrap();
    assert_eq!(config.language(), Language::Turkish);
    assert_eq!(config.timezone().unwrap(), Some(Tz::Europe__Istanbul));

    let table = TableSnapshot::load(config.table_path().unwrap())
        .unwrap()
        .into_table()
        .unwrap();
    let boundary = next_boundary_from_source(&istanbul(10, 19, 0, 0), &table).unwrap();
    assert_eq!(boundary.kind, BoundaryKind::ToSahur);
}

#[test]
fn env_overrides_replace_file_values() {
    let dir = tempdir().unwrap();
    let other = write_json(dir.path(), "other.json", &Value::Array(api_rows(2)));
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[app]\nlanguage = \"tr\"\ntimezone = \"Europe/Istanbul\"\n\n[countdown]\ntick_secs = 2\n",
    )
    .unwrap();

    let mut config = VakitConfig::load_from(&config_path).unwrap().unwrap();
    let other_str = other.display().to_string();
    config
        .apply_overrides(|var| match var {
            v if v == ENV_LANG => Some("en".to_string()),
            v if v == ENV_TZ => Some("Asia/Tokyo".to_string()),
            v if v == ENV_TABLE => Some(other_str.clone()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.language(), Language::English);
    assert_eq!(config.timezone().unwrap(), Some(Tz::Asia__Tokyo));
    assert_eq!(config.table_path(), Some(other));
    assert_eq!(config.tick(), Some(Duration::from_secs(2)));
    assert_eq!(config.widget_tick(), None);
}

#[test]
fn bad_timezone_in_file_is_reported_on_use() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[app]\ntimezone = \"Nowhere/Special\"\n").unwrap();

    let config = VakitConfig::load_from(&config_path).unwrap().unwrap();
    let err = config.timezone().unwrap_err();
    assert_eq!(err.to_string(), "unknown time zone \"Nowhere/Special\"");
}
