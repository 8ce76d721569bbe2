//! Tardiness calculation and severity classification.
//!
//! Both the scheduled start and the arrival are `HH:MM` times of the same
//! (arbitrary) day, so only the time-of-day difference matters: there is no
//! timezone, locale or date component involved.
//!
//! | delay (minutes) | category |
//! |-----------------|----------|
//! | 0               | [`OnTimePolicy`] decides |
//! | 1–5             | [`TardinessCategory::Ringan`] |
//! | 6–15            | [`TardinessCategory::Sedang`] |
//! | ≥ 16            | [`TardinessCategory::Berat`] |
//!
//! ```rust
//! use lazgo::libs::tardiness::{categorize, duration_minutes, OnTimePolicy, TardinessCategory};
//!
//! let minutes = duration_minutes("07:30", "07:36")?;
//! assert_eq!(minutes, 6);
//! assert_eq!(categorize(minutes, OnTimePolicy::Mild), Some(TardinessCategory::Sedang));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TIME_FORMAT: &str = "%H:%M";

const MILD_MAX: u32 = 5;
const MODERATE_MAX: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TardinessCategory {
    /// Mild, 1 to 5 minutes.
    Ringan,
    /// Moderate, 6 to 15 minutes.
    Sedang,
    /// Severe, 16 minutes or more.
    Berat,
}

impl TardinessCategory {
    pub const ALL: [TardinessCategory; 3] = [TardinessCategory::Ringan, TardinessCategory::Sedang, TardinessCategory::Berat];

    pub fn as_str(&self) -> &'static str {
        match self {
            TardinessCategory::Ringan => "Ringan",
            TardinessCategory::Sedang => "Sedang",
            TardinessCategory::Berat => "Berat",
        }
    }
}

impl fmt::Display for TardinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with an arrival that is not late at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OnTimePolicy {
    /// Record it anyway, classified as [`TardinessCategory::Ringan`].
    #[default]
    Mild,
    /// Do not record it: a zero-minute delay is not tardiness.
    Exclude,
}

impl OnTimePolicy {
    pub const ALL: [OnTimePolicy; 2] = [OnTimePolicy::Mild, OnTimePolicy::Exclude];

    pub fn describe(&self) -> &'static str {
        match self {
            OnTimePolicy::Mild => "Record as Ringan",
            OnTimePolicy::Exclude => "Do not record",
        }
    }
}

/// Parses an `HH:MM` time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| msg_error_anyhow!(Message::InvalidTimeFormat(value.to_string())))
}

/// Whole minutes between `start` and `arrival`, never negative.
pub fn duration_minutes(start: &str, arrival: &str) -> Result<u32> {
    let start = parse_time(start)?;
    let arrival = parse_time(arrival)?;
    Ok(minutes_between(start, arrival))
}

pub fn minutes_between(start: NaiveTime, arrival: NaiveTime) -> u32 {
    let millis = (arrival - start).num_milliseconds();
    let minutes = (millis as f64 / 60_000.0).round();
    if minutes <= 0.0 {
        0
    } else {
        minutes as u32
    }
}

/// Severity for a delay. `None` means the arrival is not recorded.
pub fn categorize(duration_minutes: u32, policy: OnTimePolicy) -> Option<TardinessCategory> {
    match duration_minutes {
        0 => match policy {
            OnTimePolicy::Mild => Some(TardinessCategory::Ringan),
            OnTimePolicy::Exclude => None,
        },
        1..=MILD_MAX => Some(TardinessCategory::Ringan),
        d if d <= MODERATE_MAX => Some(TardinessCategory::Sedang),
        _ => Some(TardinessCategory::Berat),
    }
}
