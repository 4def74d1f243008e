//! Shared fixtures for Trialyx test suites.

use chrono::NaiveDate;
use trialyx_ingestion::{AgeRange, InterventionType, NormalizedTrialRecord, RawTrialRecord};

/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Builder for raw registry rows.
#[derive(Debug, Clone, Default)]
pub struct RawRecordBuilder {
    record: RawTrialRecord,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interventions(mut self, text: &str) -> Self {
        self.record.interventions = Some(text.to_string());
        self
    }

    pub fn phases(mut self, text: &str) -> Self {
        self.record.phases = Some(text.to_string());
        self
    }

    pub fn age(mut self, text: &str) -> Self {
        self.record.age = Some(text.to_string());
        self
    }

    pub fn first_posted(mut self, text: &str) -> Self {
        self.record.first_posted = Some(text.to_string());
        self
    }

    pub fn last_update_posted(mut self, text: &str) -> Self {
        self.record.last_update_posted = Some(text.to_string());
        self
    }

    pub fn completion_date(mut self, text: &str) -> Self {
        self.record.completion_date = Some(text.to_string());
        self
    }

    pub fn column(mut self, name: &str, value: &str) -> Self {
        self.record.other.insert(name.to_string(), Some(value.to_string()));
        self
    }

    pub fn build(self) -> RawTrialRecord {
        self.record
    }
}

/// Builder for already-normalised rows, for tests that skip the pipeline.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRecordBuilder {
    record: NormalizedTrialRecord,
}

impl NormalizedRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the agent list and marks the trial as a drug trial.
    pub fn drugs(mut self, drugs: &[&str]) -> Self {
        self.record.drugs = drugs.iter().map(|d| d.to_string()).collect();
        self.record.intervention_type = InterventionType::Drug;
        self
    }

    pub fn phases(mut self, phases: &[&str]) -> Self {
        self.record.phases = phases.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn age(mut self, min: f64, max: f64) -> Self {
        self.record.age = Some(AgeRange::new(min, max));
        self
    }

    pub fn last_update(mut self, date: NaiveDate) -> Self {
        self.record.last_update_posted = Some(date);
        self
    }

    pub fn first_posted(mut self, date: NaiveDate) -> Self {
        self.record.first_posted = Some(date);
        self
    }

    pub fn build(self) -> NormalizedTrialRecord {
        self.record
    }
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
