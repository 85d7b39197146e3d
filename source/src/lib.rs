//! Prayer-time tables for Vakit.
//!
//! This crate sits on the collaborator side of the calculator: it turns the
//! upstream service's JSON rows into validated [`DailyTimes`](vakit_types::DailyTimes)
//! and serves them by date through [`vakit_core::DailyTimesSource`]. It does
//! no networking; fetching and storing the rows is someone else's job.

mod record;
mod snapshot;
mod table;

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use vakit_types::DailyTimesError;

pub use record::{ApiRecord, DateLabels};
pub use snapshot::TableSnapshot;
pub use table::TimeTable;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode prayer times: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("record has an unusable date {0:?}")]
    InvalidDate(String),
    #[error(transparent)]
    InvalidDay(#[from] DailyTimesError),
    #[error("more than one record for {0}")]
    DuplicateDate(NaiveDate),
}
