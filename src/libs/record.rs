//! Tardiness records.
//!
//! A record is created once, when the form is submitted, and never changes
//! afterwards. Its `id` is the creation instant as an ISO-8601 UTC timestamp
//! with millisecond precision, which doubles as the identity and as the key
//! for day and month grouping.
//!
//! Grouping converts the UTC instant into a calendar date in a timezone.
//! The application uses the system-local zone; around daylight-saving
//! transitions an instant can land on an unexpected local date. This is the
//! same behaviour as any wall-clock based grouping and is not corrected.

use crate::libs::messages::Message;
use crate::libs::tardiness::{self, OnTimePolicy, TardinessCategory};
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Form input for a single late arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub name: String,
    pub class_name: String,
    pub arrival_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StudentData {
    pub fn new(name: &str, class_name: &str, arrival_time: &str, reason: Option<&str>) -> Self {
        StudentData {
            name: name.trim().to_string(),
            class_name: class_name.trim().to_string(),
            arrival_time: arrival_time.trim().to_string(),
            reason: reason.map(str::trim).filter(|r| !r.is_empty()).map(str::to_string),
        }
    }

    /// Rejects submissions with a missing required field or a malformed time.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.class_name.trim().is_empty() || self.arrival_time.trim().is_empty() {
            msg_bail_anyhow!(Message::RequiredFieldsMissing);
        }
        tardiness::parse_time(&self.arrival_time)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TardinessRecord {
    pub id: String,
    #[serde(flatten)]
    pub student: StudentData,
    pub school_start_time: String,
    pub duration_minutes: u32,
    pub category: TardinessCategory,
}

impl TardinessRecord {
    /// Builds a record for a submission made at `created_at`.
    ///
    /// Fails on invalid input, and when `policy` excludes an on-time arrival.
    pub fn create(student: StudentData, school_start_time: &str, created_at: DateTime<Utc>, policy: OnTimePolicy) -> Result<Self> {
        student.validate()?;
        let duration_minutes = tardiness::duration_minutes(school_start_time, &student.arrival_time)?;
        let category = tardiness::categorize(duration_minutes, policy).ok_or_else(|| msg_error_anyhow!(Message::OnTimeNotRecorded(student.name.clone())))?;

        Ok(TardinessRecord {
            id: format_id(created_at),
            student,
            school_start_time: school_start_time.to_string(),
            duration_minutes,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.student.name
    }

    pub fn class_name(&self) -> &str {
        &self.student.class_name
    }

    pub fn arrival_time(&self) -> &str {
        &self.student.arrival_time
    }

    pub fn reason(&self) -> Option<&str> {
        self.student.reason.as_deref()
    }

    /// Creation instant parsed back from the id.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.id).ok().map(|ts| ts.with_timezone(&Utc))
    }

    /// Calendar date of creation in `tz`.
    pub fn day_key_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.created_at().map(|ts| ts.with_timezone(tz).date_naive())
    }

    /// Calendar date of creation in the system-local timezone.
    pub fn day_key(&self) -> Option<NaiveDate> {
        self.day_key_in(&Local)
    }

    /// `(year, month)` of creation in `tz`, month 1-based.
    pub fn month_key_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<(i32, u32)> {
        self.day_key_in(tz).map(|date| (date.year(), date.month()))
    }

    pub fn month_key(&self) -> Option<(i32, u32)> {
        self.month_key_in(&Local)
    }
}

pub fn format_id(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
