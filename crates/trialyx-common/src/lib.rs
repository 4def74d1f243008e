//! trialyx-common — Shared errors and configuration used across all Trialyx crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{AgeAggregation, PhaseWeights, ScoringConfig, TrialyxConfig};
pub use error::{DateParseError, Result, TrialyxError};
