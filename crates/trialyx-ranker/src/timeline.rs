//! Trials-per-date counts for one of the registry date columns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trialyx_ingestion::{DateColumn, NormalizedTrialRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Number Of Trials")]
    pub trials: usize,
}

/// Count records per distinct date in `column`, ascending by date.
/// Records without a date in that column are skipped.
pub fn timeline_counts(table: &[NormalizedTrialRecord], column: DateColumn) -> Vec<TimelinePoint> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in table.iter().filter_map(|r| r.date(column)) {
        *counts.entry(date).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, trials)| TimelinePoint { date, trials })
        .collect()
}
