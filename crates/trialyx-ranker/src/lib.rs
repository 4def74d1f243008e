//! trialyx-ranker — Agent aggregation and activity scoring over normalised
//! registry records.

pub mod aggregate;
pub mod cooccurrence;
pub mod export;
pub mod scorer;
pub mod timeline;

pub use aggregate::{agent_frequencies, distinct_agents, restrict_to_agents, AgentFrequency};
pub use cooccurrence::{build_cooccurrence, CooccurrenceMatrix};
pub use scorer::{score_agents, score_agents_at, AgentActivityRow};
pub use timeline::{timeline_counts, TimelinePoint};
