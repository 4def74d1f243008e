//! trialyx-ingestion — Clinical-trial registry record models and the
//! normalisation pipeline that turns free-text registry fields into typed values.

pub mod models;
pub mod normalise;
pub mod pipeline;

pub use models::{
    AgeRange, DateColumn, InterventionType, NormalizedTrialRecord, RawTrialRecord,
};
pub use pipeline::{normalize_record, normalize_table};
