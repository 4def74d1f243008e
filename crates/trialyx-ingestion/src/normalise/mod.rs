//! Field extractors.
//!
//! Each extractor parses one free-text registry field into a typed value:
//! - `age`: eligibility description → `AgeRange`
//! - `phase`: pipe-delimited phase list → ordered labels
//! - `intervention`: intervention type and named agents
//! - `date`: best-effort free-text date parsing

pub mod age;
pub mod date;
pub mod intervention;
pub mod phase;

pub use age::extract_age_range;
pub use date::parse_date;
pub use intervention::{classify_intervention, extract_agents};
pub use phase::extract_phases;
