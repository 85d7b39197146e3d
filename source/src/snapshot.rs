//! Cached copy of a district's table as last fetched.
//!
//! The app keeps the fetched rows together with the fetch time and treats
//! them as valid for one calendar month. A bare JSON array of rows (the raw
//! service response) is also accepted; with no fetch time it is never fresh.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::{ApiRecord, SourceError, TimeTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub fetched_at: Option<DateTime<Utc>>,
    pub records: Vec<ApiRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Envelope(TableSnapshot),
    Bare(Vec<ApiRecord>),
}

impl TableSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        let snapshot = match serde_json::from_str(raw)? {
            SnapshotFile::Envelope(snapshot) => snapshot,
            SnapshotFile::Bare(records) => Self {
                fetched_at: None,
                records,
            },
        };
        Ok(snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            records = snapshot.records.len(),
            "Loaded prayer time snapshot"
        );
        Ok(snapshot)
    }

    /// Whether the snapshot was fetched less than one calendar month before `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let Some(fetched_at) = self.fetched_at else {
            return false;
        };
        match now.checked_sub_months(Months::new(1)) {
            Some(cutoff) => fetched_at > cutoff,
            None => true,
        }
    }

    pub fn into_table(self) -> Result<TimeTable, SourceError> {
        TimeTable::from_api_records(self.records)
    }
}
