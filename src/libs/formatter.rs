//! Indonesian (`id-ID`) date formatting and text clean-up for reports.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lazgo::libs::formatter::{long_date, short_date};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
//! assert_eq!(short_date(date), "13/1/2025");
//! assert_eq!(long_date(date), "Senin, 13 Januari 2025");
//! ```

use crate::libs::record::TardinessRecord;
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

const DAY_NAMES: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

/// Month name for a 1-based month; out-of-range values give an empty string.
pub fn month_name(month: u32) -> &'static str {
    month.checked_sub(1).and_then(|i| MONTH_NAMES.get(i as usize)).copied().unwrap_or("")
}

/// `13/1/2025`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// `Senin, 13 Januari 2025`
pub fn long_date(date: NaiveDate) -> String {
    let day_name = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{}, {} {} {}", day_name, date.day(), month_name(date.month()), date.year())
}

/// `Januari 2025`
pub fn period_label(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

/// `13-01-2025`, safe for file names.
pub fn file_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Local creation date of a record, or `-` for an unparsable id.
pub fn record_date(record: &TardinessRecord) -> String {
    record.day_key().map(short_date).unwrap_or_else(|| "-".to_string())
}

/// Removes markdown bold markers.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}
