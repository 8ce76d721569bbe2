//! AI report results and the per-slot request state.
//!
//! There are two report slots, daily and monthly. Each moves through
//!
//! ```text
//!            begin()            resolve(Ok)
//!   Empty ───────────▶ Loading ────────────▶ Ready
//!                        ▲   └─────────────▶ Errored
//!                        │     resolve(Err)     │
//!                        └──────── begin() ─────┘ (also from Ready)
//! ```
//!
//! `Loading` is never left for `Empty`: a request always resolves. Only
//! [`ReportSlot::reset`] (used when the selected month changes) returns a
//! slot to `Empty`.

use crate::libs::record::TardinessRecord;
use serde::{Deserialize, Serialize};

/// The three sections extracted from one daily AI response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOutput {
    pub summary: String,
    pub whatsapp: String,
    pub daily_recap: String,
}

/// The student with the most late arrivals in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOffender {
    pub name: String,
    pub class_name: String,
    pub count: usize,
}

/// Student with the most records; ties go to the earliest first appearance.
///
/// The class comes from that student's first record.
pub fn top_offender(records: &[TardinessRecord]) -> Option<TopOffender> {
    let mut tally: Vec<TopOffender> = Vec::new();
    for record in records {
        match tally.iter_mut().find(|t| t.name == record.name()) {
            Some(entry) => entry.count += 1,
            None => tally.push(TopOffender {
                name: record.name().to_string(),
                class_name: record.class_name().to_string(),
                count: 1,
            }),
        }
    }

    tally.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.count >= candidate.count => Some(best),
        _ => Some(candidate),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportResult {
    /// Markdown analysis written by the AI service.
    pub report: String,
    pub parent_message: Option<String>,
    pub top_offender: Option<TopOffender>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportSlot<T> {
    #[default]
    Empty,
    Loading,
    Ready(T),
    /// User-facing error text.
    Errored(String),
}

impl<T> ReportSlot<T> {
    /// Marks a request as in flight, discarding the previous result.
    pub fn begin(&mut self) {
        *self = ReportSlot::Loading;
    }

    /// Settles the in-flight request.
    pub fn resolve(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => ReportSlot::Ready(value),
            Err(message) => ReportSlot::Errored(message),
        };
    }

    pub fn reset(&mut self) {
        *self = ReportSlot::Empty;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ReportSlot::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ReportSlot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReportSlot::Errored(message) => Some(message),
            _ => None,
        }
    }
}
