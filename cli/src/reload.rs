//! Re-reading the prayer-times snapshot while the countdown runs.
//!
//! A live countdown that reports missing data retries the file, at most once
//! per interval, so a snapshot written by another tool is picked up without
//! a restart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::time::Instant;

use vakit_source::{TableSnapshot, TimeTable};

/// Floor for the retry interval, whatever the tick.
pub const MIN_RELOAD_INTERVAL: Duration = Duration::from_secs(10);

pub fn load_table(path: &Path) -> Result<TimeTable> {
    let snapshot = TableSnapshot::load(path)
        .with_context(|| format!("failed to load prayer times from {}", path.display()))?;
    if !snapshot.is_fresh(Utc::now()) {
        tracing::warn!(
            path = %path.display(),
            fetched_at = ?snapshot.fetched_at,
            "Prayer time snapshot is older than a month"
        );
    }
    let table = snapshot.into_table()?;
    tracing::info!(
        days = table.len(),
        first = ?table.first_date(),
        last = ?table.last_date(),
        "Prayer time table ready"
    );
    Ok(table)
}

#[derive(Debug)]
pub struct TableReloader {
    path: PathBuf,
    min_interval: Duration,
    last_attempt: Option<Instant>,
}

impl TableReloader {
    pub fn new(path: impl Into<PathBuf>, min_interval: Duration) -> Self {
        Self {
            path: path.into(),
            min_interval,
            last_attempt: None,
        }
    }

    /// Count the startup load as the first attempt.
    pub fn attempted_at(mut self, at: Instant) -> Self {
        self.last_attempt = Some(at);
        self
    }

    /// Loads the table again unless the last attempt was under `min_interval` ago.
    ///
    /// Failures are logged and yield `None`; the caller keeps its current table.
    pub fn reload_due(&mut self, now: Instant) -> Option<TimeTable> {
        if let Some(last) = self.last_attempt
            && now.saturating_duration_since(last) < self.min_interval
        {
            return None;
        }
        self.last_attempt = Some(now);

        match load_table(&self.path) {
            Ok(table) => Some(table),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Reload failed: {err:#}");
                None
            }
        }
    }
}
