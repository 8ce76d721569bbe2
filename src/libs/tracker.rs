//! The controller behind every command.
//!
//! [`Tracker`] owns the storage handle, the record list, the configuration
//! and both report slots. Mutations are saved explicitly and synchronously
//! before any remote request starts, so a failed AI call never loses a
//! record.
//!
//! ```text
//! submit(student) ──▶ validate ──▶ append + save ──▶ Submission
//!                                                       │
//! generate_daily(&submission) ──▶ daily slot: Loading ──┴─▶ Ready (cached) | Errored
//! ```

use crate::api::parse::{monthly_response_schema, parse_daily_response, parse_monthly_response, DailySections, MonthlyResponse};
use crate::api::TextGenerator;
use crate::db::storage::Storage;
use crate::libs::config::Config;
use crate::libs::formatter::period_label;
use crate::libs::messages::Message;
use crate::libs::prompt::{daily_prompt, fallback_parent_message, monthly_prompt, PARENT_NOTICE_THRESHOLD};
use crate::libs::record::{StudentData, TardinessRecord};
use crate::libs::report::{top_offender, GeneratedOutput, MonthlyReportResult, ReportSlot, TopOffender};
use crate::libs::store::{default_period, filter_by_day, filter_by_month, load_daily_output, save_daily_output, RecordStore};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::{debug, warn};

/// A freshly stored record with the day's records that preceded it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: TardinessRecord,
    pub history: Vec<TardinessRecord>,
}

pub struct Tracker<G: TextGenerator> {
    storage: Storage,
    store: RecordStore,
    config: Config,
    generator: G,
    daily: ReportSlot<GeneratedOutput>,
    monthly: ReportSlot<MonthlyReportResult>,
    period: (i32, u32),
}

impl<G: TextGenerator> Tracker<G> {
    /// Loads the records and today's cached AI output.
    pub fn new(storage: Storage, config: Config, generator: G) -> Result<Self> {
        Self::new_on(storage, config, generator, Local::now().date_naive())
    }

    pub fn new_on(storage: Storage, config: Config, generator: G, today: NaiveDate) -> Result<Self> {
        let store = RecordStore::load(&storage)?;
        let daily = match load_daily_output(&storage, today)? {
            Some(output) => ReportSlot::Ready(output),
            None => ReportSlot::Empty,
        };
        let period = default_period(store.records(), today);

        Ok(Tracker {
            storage,
            store,
            config,
            generator,
            daily,
            monthly: ReportSlot::Empty,
            period,
        })
    }

    pub fn records(&self) -> &[TardinessRecord] {
        self.store.records()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn daily_slot(&self) -> &ReportSlot<GeneratedOutput> {
        &self.daily
    }

    pub fn monthly_slot(&self) -> &ReportSlot<MonthlyReportResult> {
        &self.monthly
    }

    /// Creates and persists a record submitted at `now`.
    ///
    /// Invalid input, or an on-time arrival excluded by the configured
    /// policy, is rejected before anything is written.
    pub fn submit(&mut self, student: StudentData, now: DateTime<Utc>) -> Result<Submission> {
        let school = self.config.school();
        let record = TardinessRecord::create(student, &school.start_time, now, school.on_time_policy)?;

        let day = record.day_key().unwrap_or_else(|| now.with_timezone(&Local).date_naive());
        let history = filter_by_day(self.store.records(), day);

        let record = self.store.append(record).clone();
        self.store.save(&mut self.storage)?;
        debug!("Stored record {} ({} earlier today)", record.id, history.len());

        Ok(Submission { record, history })
    }

    /// Records of `date`, most recent first.
    pub fn records_on(&self, date: NaiveDate) -> Vec<TardinessRecord> {
        let mut records = filter_by_day(self.store.records(), date);
        records.reverse();
        records
    }

    /// Requests the daily AI output for a submission and caches it on success.
    pub async fn generate_daily(&mut self, submission: &Submission) -> &ReportSlot<GeneratedOutput> {
        self.daily.begin();

        let prompt = daily_prompt(&submission.record, &submission.history);
        let result = match self.generator.generate_text(&prompt).await {
            Ok(text) => parse_daily_response(&text).map(DailySections::into_output).map_err(|e| {
                warn!("{}", Message::AiResponseUnparsable(e.to_string()));
                Message::AiDailyFailed.to_string()
            }),
            Err(e) => {
                warn!("{}", Message::AiRequestFailed(e.to_string()));
                Err(Message::AiDailyFailed.to_string())
            }
        };

        if let Ok(output) = &result {
            let day = submission.record.day_key().unwrap_or_else(|| Local::now().date_naive());
            if let Err(e) = save_daily_output(&mut self.storage, day, output) {
                warn!("Failed to cache the daily AI output: {}", e);
            }
        }

        self.daily.resolve(result);
        &self.daily
    }

    pub fn selected_period(&self) -> (i32, u32) {
        self.period
    }

    /// Switches the month in view; a different month discards the monthly report.
    pub fn select_month(&mut self, year: i32, month: u32) {
        if self.period != (year, month) {
            self.period = (year, month);
            self.monthly.reset();
        }
    }

    /// Records of the selected month, in insertion order.
    pub fn month_records(&self) -> Vec<TardinessRecord> {
        let (year, month) = self.period;
        filter_by_month(self.store.records(), year, month)
    }

    /// Requests the AI analysis of the selected month.
    ///
    /// A month without records is left untouched: there is nothing to analyse.
    pub async fn generate_monthly(&mut self) -> &ReportSlot<MonthlyReportResult> {
        let records = self.month_records();
        if records.is_empty() {
            return &self.monthly;
        }
        self.monthly.begin();

        let (year, month) = self.period;
        let top = top_offender(&records);
        let prompt = monthly_prompt(&records, top.as_ref());

        let result = match self.generator.generate_json(&prompt, &monthly_response_schema()).await {
            Ok(text) => parse_monthly_response(&text).map(|response| monthly_result(response, top, &period_label(year, month))).map_err(|e| {
                warn!("{}", Message::AiResponseUnparsable(e.to_string()));
                Message::AiMonthlyFailed.to_string()
            }),
            Err(e) => {
                warn!("{}", Message::AiRequestFailed(e.to_string()));
                Err(Message::AiMonthlyFailed.to_string())
            }
        };

        self.monthly.resolve(result);
        &self.monthly
    }
}

/// Applies the parent-notice policy to a monthly response.
///
/// Below [`PARENT_NOTICE_THRESHOLD`] late arrivals there is never a parent
/// message. At or above it there always is one, templated locally when the
/// service did not write it.
pub fn monthly_result(response: MonthlyResponse, top: Option<TopOffender>, period: &str) -> MonthlyReportResult {
    let parent_message = match &top {
        Some(top) if top.count >= PARENT_NOTICE_THRESHOLD => {
            Some(response.parent_message.unwrap_or_else(|| fallback_parent_message(top, period)))
        }
        _ => None,
    };

    MonthlyReportResult {
        report: response.report,
        parent_message,
        top_offender: top,
    }
}
