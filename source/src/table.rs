use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;

use vakit_core::DailyTimesSource;
use vakit_types::DailyTimes;

use crate::{ApiRecord, DateLabels, SourceError};

/// A contiguous run of daily records for one district, keyed by date.
///
/// Every record has been validated (all six slots parse and ascend) and no
/// date appears twice. Display dates are kept alongside when the rows
/// carried them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeTable {
    days: BTreeMap<NaiveDate, DailyTimes>,
    labels: BTreeMap<NaiveDate, DateLabels>,
}

impl TimeTable {
    pub fn from_daily(records: impl IntoIterator<Item = DailyTimes>) -> Result<Self, SourceError> {
        let mut days = BTreeMap::new();
        for record in records {
            record.validate()?;
            match days.entry(record.date) {
                Entry::Occupied(_) => return Err(SourceError::DuplicateDate(record.date)),
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }

        let table = Self {
            days,
            labels: BTreeMap::new(),
        };
        if let (Some(first), Some(last)) = (table.first_date(), table.last_date()) {
            let expected = (last - first).num_days() + 1;
            if expected != table.len() as i64 {
                tracing::warn!(
                    %first,
                    %last,
                    records = table.len(),
                    "Prayer time table has gaps"
                );
            }
        }
        Ok(table)
    }

    pub fn from_api_records(
        records: impl IntoIterator<Item = ApiRecord>,
    ) -> Result<Self, SourceError> {
        let mut daily = Vec::new();
        let mut labels = BTreeMap::new();
        for record in records {
            let (day, day_labels) = record.into_parts()?;
            if !day_labels.is_empty() {
                labels.insert(day.date, day_labels);
            }
            daily.push(day);
        }
        let mut table = Self::from_daily(daily)?;
        table.labels = labels;
        Ok(table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyTimes> {
        self.days.values()
    }

    #[must_use]
    pub fn labels(&self, date: NaiveDate) -> Option<&DateLabels> {
        self.labels.get(&date)
    }
}

impl DailyTimesSource for TimeTable {
    fn daily_times(&self, date: NaiveDate) -> Option<&DailyTimes> {
        self.days.get(&date)
    }
}
