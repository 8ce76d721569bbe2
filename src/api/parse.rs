//! Parsers for AI responses.
//!
//! Daily responses are free text split into three numbered sections; monthly
//! responses are JSON. Both parsers return a tagged error instead of
//! guessing, and the caller decides what the user sees.

use crate::libs::prompt::{RECAP_LABEL, RECAP_MARKER, SUMMARY_LABEL, SUMMARY_MARKER, WHATSAPP_LABEL, WHATSAPP_MARKER};
use crate::libs::report::GeneratedOutput;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

const SUMMARY_FALLBACK: &str = "Gagal memuat ringkasan.";
const WHATSAPP_FALLBACK: &str = "Gagal memuat pesan WhatsApp.";
const RECAP_FALLBACK: &str = "Gagal memuat rekap harian.";

/// Section headers in the order the prompt asks for them.
const HEADERS: [(&str, &str); 3] = [(SUMMARY_MARKER, SUMMARY_LABEL), (WHATSAPP_MARKER, WHATSAPP_LABEL), (RECAP_MARKER, RECAP_LABEL)];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("the AI response was empty")]
    Empty,
    #[error("none of the expected report sections were found")]
    NoSections,
    #[error("the AI response is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Sections found in a daily response; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySections {
    pub summary: Option<String>,
    pub whatsapp: Option<String>,
    pub daily_recap: Option<String>,
}

impl DailySections {
    /// Fills missing sections with their fallback text.
    pub fn into_output(self) -> GeneratedOutput {
        GeneratedOutput {
            summary: self.summary.unwrap_or_else(|| SUMMARY_FALLBACK.to_string()),
            whatsapp: self.whatsapp.unwrap_or_else(|| WHATSAPP_FALLBACK.to_string()),
            daily_recap: self.daily_recap.unwrap_or_else(|| RECAP_FALLBACK.to_string()),
        }
    }
}

pub fn parse_daily_response(text: &str) -> Result<DailySections, ResponseParseError> {
    if text.trim().is_empty() {
        return Err(ResponseParseError::Empty);
    }

    let sections = DailySections {
        summary: section(text, 0),
        whatsapp: section(text, 1),
        daily_recap: section(text, 2),
    };

    if sections == DailySections::default() {
        return Err(ResponseParseError::NoSections);
    }
    Ok(sections)
}

/// Body of the `index`-th section, up to the next full section header.
///
/// A bare marker inside a body (a keycap-numbered list in the recap, say)
/// does not end the section; only `<marker> **<label>**` does.
fn section(text: &str, index: usize) -> Option<String> {
    let (marker, label) = HEADERS[index];
    let (_, body_start) = find_header(text, marker, label)?;
    let rest = &text[body_start..];
    let body_end = HEADERS[index + 1..]
        .iter()
        .filter_map(|(marker, label)| find_header(rest, marker, label))
        .map(|(start, _)| start)
        .min()
        .unwrap_or(rest.len());
    Some(rest[..body_end].trim().to_string())
}

/// Byte range of the first `<marker> **<label>**` header in `text`.
fn find_header(text: &str, marker: &str, label: &str) -> Option<(usize, usize)> {
    let heading = format!("**{}**", label);
    let mut from = 0;
    while let Some(pos) = text[from..].find(marker) {
        let start = from + pos;
        let after_marker = start + marker.len();
        let tail = &text[after_marker..];
        let trimmed = tail.trim_start();
        if trimmed.starts_with(&heading) {
            return Some((start, after_marker + (tail.len() - trimmed.len()) + heading.len()));
        }
        from = after_marker;
    }
    None
}

/// Fields of the monthly JSON answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResponse {
    pub report: String,
    #[serde(default)]
    pub parent_message: Option<String>,
}

pub fn parse_monthly_response(text: &str) -> Result<MonthlyResponse, ResponseParseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ResponseParseError::Empty);
    }

    let mut parsed: MonthlyResponse = serde_json::from_str(body).map_err(|e| ResponseParseError::InvalidJson(e.to_string()))?;
    parsed.report = parsed.report.trim().to_string();
    parsed.parent_message = parsed.parent_message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
    Ok(parsed)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Response schema sent with the monthly request.
pub fn monthly_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "report": { "type": "STRING" },
            "parentMessage": { "type": "STRING", "nullable": true }
        },
        "required": ["report"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_must_follow_its_marker() {
        let text = "**Ringkasan Keterlambatan** tanpa penanda\n1️⃣ **Ringkasan Keterlambatan**\nIsi";
        assert_eq!(section(text, 0).as_deref(), Some("Isi"));
    }

    #[test]
    fn strips_fence_without_language_tag() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }
}
