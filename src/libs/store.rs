//! The append-only record list and the other persisted values.
//!
//! Persisted keys (all JSON-encoded):
//!
//! | key                 | value                                   |
//! |---------------------|-----------------------------------------|
//! | `tardinessRecords`  | full record list, insertion order       |
//! | `dailyReportOutput` | `{date, data}` daily AI output cache    |
//! | `theme`             | `"light"` or `"dark"`                   |
//! | `studentRoster`     | known students for suggestions          |
//!
//! Unreadable stored values never stop the application: they degrade to the
//! empty/default value and a warning is logged.

use crate::db::storage::Storage;
use crate::libs::messages::Message;
use crate::libs::record::{format_id, TardinessRecord};
use crate::libs::report::GeneratedOutput;
use crate::msg_debug;
use anyhow::Result;
use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const RECORDS_KEY: &str = "tardinessRecords";
pub const DAILY_OUTPUT_KEY: &str = "dailyReportOutput";
pub const THEME_KEY: &str = "theme";
pub const ROSTER_KEY: &str = "studentRoster";

const CACHE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<TardinessRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<TardinessRecord>) -> Self {
        RecordStore { records }
    }

    /// Loads the persisted list. Storage failures propagate; unparsable data
    /// yields an empty list.
    pub fn load(storage: &Storage) -> Result<Self> {
        let raw = storage.get(RECORDS_KEY)?;
        Ok(Self::from_json(raw.as_deref()))
    }

    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<TardinessRecord>>(raw) {
            Ok(records) => Self::new(records),
            Err(e) => {
                tracing::warn!("{}", Message::RecordsLoadFailed(e.to_string()));
                Self::default()
            }
        }
    }

    /// Writes the whole list under [`RECORDS_KEY`].
    pub fn save(&self, storage: &mut Storage) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        storage.set(RECORDS_KEY, &json)
    }

    /// Appends a record, keeping ids strictly increasing.
    ///
    /// A record created in the same millisecond as (or, after a clock step,
    /// before) the last one gets its id moved to 1 ms after it.
    pub fn append(&mut self, mut record: TardinessRecord) -> &TardinessRecord {
        let last = self.records.last().and_then(|r| r.created_at());
        if let (Some(last), Some(current)) = (last, record.created_at()) {
            if current <= last {
                record.id = format_id(last + Duration::milliseconds(1));
                msg_debug!(Message::RecordIdAdjusted(record.id.clone()));
            }
        }
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[TardinessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Records created on `date` in the system-local timezone, in insertion order.
pub fn filter_by_day(records: &[TardinessRecord], date: NaiveDate) -> Vec<TardinessRecord> {
    filter_by_day_in(records, date, &Local)
}

pub fn filter_by_day_in<Tz: TimeZone>(records: &[TardinessRecord], date: NaiveDate, tz: &Tz) -> Vec<TardinessRecord> {
    records.iter().filter(|r| r.day_key_in(tz) == Some(date)).cloned().collect()
}

/// Records created in `year`/`month` (1-based) in the system-local timezone.
pub fn filter_by_month(records: &[TardinessRecord], year: i32, month: u32) -> Vec<TardinessRecord> {
    filter_by_month_in(records, year, month, &Local)
}

pub fn filter_by_month_in<Tz: TimeZone>(records: &[TardinessRecord], year: i32, month: u32, tz: &Tz) -> Vec<TardinessRecord> {
    records.iter().filter(|r| r.month_key_in(tz) == Some((year, month))).cloned().collect()
}

/// Years with data, each with the months (1-based) that contain records.
pub fn available_periods(records: &[TardinessRecord]) -> BTreeMap<i32, BTreeSet<u32>> {
    let mut periods: BTreeMap<i32, BTreeSet<u32>> = BTreeMap::new();
    for (year, month) in records.iter().filter_map(|r| r.month_key()) {
        periods.entry(year).or_default().insert(month);
    }
    periods
}

/// The month to show when none is chosen: `today`'s month if it has data,
/// otherwise the latest month with data, otherwise `today`'s month.
pub fn default_period(records: &[TardinessRecord], today: NaiveDate) -> (i32, u32) {
    let current = (today.year(), today.month());
    let periods = available_periods(records);
    if periods.get(&current.0).is_some_and(|months| months.contains(&current.1)) {
        return current;
    }
    periods
        .last_key_value()
        .and_then(|(year, months)| months.last().map(|month| (*year, *month)))
        .unwrap_or(current)
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedDailyOutput {
    date: String,
    data: GeneratedOutput,
}

/// The cached daily AI output, only if it was stored on `today`.
pub fn load_daily_output(storage: &Storage, today: NaiveDate) -> Result<Option<GeneratedOutput>> {
    let Some(raw) = storage.get(DAILY_OUTPUT_KEY)? else {
        return Ok(None);
    };
    let cached = match serde_json::from_str::<CachedDailyOutput>(&raw) {
        Ok(cached) => cached,
        Err(e) => {
            tracing::warn!("{}", Message::DailyCacheLoadFailed(e.to_string()));
            return Ok(None);
        }
    };
    if cached.date == today.format(CACHE_DATE_FORMAT).to_string() {
        Ok(Some(cached.data))
    } else {
        Ok(None)
    }
}

pub fn save_daily_output(storage: &mut Storage, today: NaiveDate, output: &GeneratedOutput) -> Result<()> {
    let cached = CachedDailyOutput {
        date: today.format(CACHE_DATE_FORMAT).to_string(),
        data: output.clone(),
    };
    storage.set(DAILY_OUTPUT_KEY, &serde_json::to_string(&cached)?)
}
