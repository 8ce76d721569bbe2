//! At-a-glance statistics over a set of records.

use crate::libs::reason::NO_REASON;
use crate::libs::record::TardinessRecord;
use crate::libs::tardiness::TardinessCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub most_common_reason: String,
    pub top_class: String,
    /// Mean delay, rounded to whole minutes.
    pub average_minutes: u32,
    pub ringan: usize,
    pub sedang: usize,
    pub berat: usize,
}

impl Insight {
    /// `None` for an empty set.
    pub fn from_records(records: &[TardinessRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let most_common_reason = most_frequent(records.iter().map(|r| r.reason().unwrap_or(NO_REASON)));
        let top_class = most_frequent(records.iter().map(|r| r.class_name()));

        let total: u64 = records.iter().map(|r| u64::from(r.duration_minutes)).sum();
        let average_minutes = (total as f64 / records.len() as f64).round() as u32;

        let count = |category: TardinessCategory| records.iter().filter(|r| r.category == category).count();

        Some(Insight {
            most_common_reason,
            top_class,
            average_minutes,
            ringan: count(TardinessCategory::Ringan),
            sedang: count(TardinessCategory::Sedang),
            berat: count(TardinessCategory::Berat),
        })
    }
}

/// Most frequent value; on a tie the value first seen later wins.
fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, best_n)| n >= best_n) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value.to_string()).unwrap_or_else(|| "N/A".to_string())
}
