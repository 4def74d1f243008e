//! Summary views over a normalised table: distinct agents, agent
//! frequencies and agent-based row filtering.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use trialyx_ingestion::NormalizedTrialRecord;

/// One row of the frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFrequency {
    #[serde(rename = "Agent")]
    pub agent: String,
    #[serde(rename = "Number Of Trials")]
    pub trials: usize,
}

/// Every agent named anywhere in the table, in first-encounter order.
///
/// The order is stable for a given table and is the axis order used by the
/// co-occurrence matrix and the tie-break order of the scoring table.
pub fn distinct_agents(table: &[NormalizedTrialRecord]) -> Vec<String> {
    let agents: IndexSet<&str> = table
        .iter()
        .flat_map(|r| r.drugs.iter().map(String::as_str))
        .collect();
    agents.into_iter().map(str::to_string).collect()
}

/// Occurrences of each agent across all records, most frequent first.
/// An agent named twice in one record counts twice. Ties keep
/// first-encounter order.
pub fn agent_frequencies(table: &[NormalizedTrialRecord]) -> Vec<AgentFrequency> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for agent in table.iter().flat_map(|r| r.drugs.iter()) {
        *counts.entry(agent.as_str()).or_insert(0) += 1;
    }

    let mut ranking: Vec<AgentFrequency> = counts
        .into_iter()
        .map(|(agent, trials)| AgentFrequency { agent: agent.to_string(), trials })
        .collect();
    ranking.sort_by(|a, b| b.trials.cmp(&a.trials));
    ranking
}

/// Records naming at least one of `agents`.
pub fn restrict_to_agents<S: AsRef<str>>(
    table: &[NormalizedTrialRecord],
    agents: &[S],
) -> Vec<NormalizedTrialRecord> {
    table
        .iter()
        .filter(|r| agents.iter().any(|a| r.names_agent(a.as_ref())))
        .cloned()
        .collect()
}
