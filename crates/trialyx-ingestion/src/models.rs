//! Data models for the normalisation pipeline.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const COL_COMPLETION_DATE: &str = "Completion Date";
pub const COL_FIRST_POSTED: &str = "First Posted";
pub const COL_RESULTS_FIRST_POSTED: &str = "Results First Posted";
pub const COL_LAST_UPDATE_POSTED: &str = "Last Update Posted";
pub const COL_AGE: &str = "Age";
pub const COL_PHASES: &str = "Phases";
pub const COL_INTERVENTIONS: &str = "Interventions";

/// One row of a registry export, as read from the source table.
/// `None` means the cell was missing, which is distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrialRecord {
    #[serde(rename = "Completion Date", default)]
    pub completion_date: Option<String>,
    #[serde(rename = "First Posted", default)]
    pub first_posted: Option<String>,
    #[serde(rename = "Results First Posted", default)]
    pub results_first_posted: Option<String>,
    #[serde(rename = "Last Update Posted", default)]
    pub last_update_posted: Option<String>,
    #[serde(rename = "Age", default)]
    pub age: Option<String>,
    #[serde(rename = "Phases", default)]
    pub phases: Option<String>,
    #[serde(rename = "Interventions", default)]
    pub interventions: Option<String>,
    /// Every other column (NCT Number, Title, Status, ...), passed through untouched.
    #[serde(flatten)]
    pub other: IndexMap<String, Option<String>>,
}

/// Eligibility age range in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterventionType {
    Drug,
    #[default]
    Other,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::Drug  => "Drug",
            InterventionType::Other => "Other",
        }
    }
}

/// A registry row after field extraction. Never mutated once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTrialRecord {
    #[serde(rename = "Completion Date")]
    pub completion_date: Option<NaiveDate>,
    #[serde(rename = "First Posted")]
    pub first_posted: Option<NaiveDate>,
    #[serde(rename = "Results First Posted")]
    pub results_first_posted: Option<NaiveDate>,
    #[serde(rename = "Last Update Posted")]
    pub last_update_posted: Option<NaiveDate>,
    #[serde(rename = "Age")]
    pub age: Option<AgeRange>,
    #[serde(rename = "Phases")]
    pub phases: Vec<String>,
    /// Raw intervention text, kept alongside the derived columns.
    #[serde(rename = "Interventions")]
    pub interventions: Option<String>,
    #[serde(rename = "Intervention Type")]
    pub intervention_type: InterventionType,
    /// Agents named by the trial, in source order. Repeats are preserved.
    #[serde(rename = "Drugs")]
    pub drugs: Vec<String>,
    #[serde(flatten)]
    pub other: IndexMap<String, Option<String>>,
}

impl NormalizedTrialRecord {
    pub fn names_agent(&self, agent: &str) -> bool {
        self.drugs.iter().any(|d| d == agent)
    }

    pub fn has_phase(&self, label: &str) -> bool {
        self.phases.iter().any(|p| p == label)
    }

    pub fn date(&self, column: DateColumn) -> Option<NaiveDate> {
        match column {
            DateColumn::CompletionDate     => self.completion_date,
            DateColumn::FirstPosted        => self.first_posted,
            DateColumn::ResultsFirstPosted => self.results_first_posted,
            DateColumn::LastUpdatePosted   => self.last_update_posted,
        }
    }
}

/// The four date columns of a registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateColumn {
    CompletionDate,
    FirstPosted,
    ResultsFirstPosted,
    LastUpdatePosted,
}

impl DateColumn {
    pub const ALL: [DateColumn; 4] = [
        DateColumn::CompletionDate,
        DateColumn::FirstPosted,
        DateColumn::ResultsFirstPosted,
        DateColumn::LastUpdatePosted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateColumn::CompletionDate     => COL_COMPLETION_DATE,
            DateColumn::FirstPosted        => COL_FIRST_POSTED,
            DateColumn::ResultsFirstPosted => COL_RESULTS_FIRST_POSTED,
            DateColumn::LastUpdatePosted   => COL_LAST_UPDATE_POSTED,
        }
    }

    pub fn raw<'a>(&self, record: &'a RawTrialRecord) -> Option<&'a str> {
        match self {
            DateColumn::CompletionDate     => record.completion_date.as_deref(),
            DateColumn::FirstPosted        => record.first_posted.as_deref(),
            DateColumn::ResultsFirstPosted => record.results_first_posted.as_deref(),
            DateColumn::LastUpdatePosted   => record.last_update_posted.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_keeps_extra_columns() {
        let json = r#"{
            "NCT Number": "NCT04315948",
            "Interventions": "Drug: Remdesivir",
            "Age": null,
            "Status": "Recruiting"
        }"#;
        let rec: RawTrialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.interventions.as_deref(), Some("Drug: Remdesivir"));
        assert_eq!(rec.age, None);
        assert_eq!(rec.phases, None);
        assert_eq!(rec.other.get("NCT Number"), Some(&Some("NCT04315948".to_string())));
        assert_eq!(rec.other.keys().collect::<Vec<_>>(), vec!["NCT Number", "Status"]);
    }

    #[test]
    fn test_date_column_names() {
        let names: Vec<_> = DateColumn::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["Completion Date", "First Posted", "Results First Posted", "Last Update Posted"]
        );
    }
}
