//! Agent activity scoring.
//!
//! For every distinct agent the engine counts its trials, the trials updated
//! inside the recency window and the trials in phases 2, 3 and 4, then
//! combines them into
//!
//! ```text
//! score = round( ln( updates/trials × (w1·trials + w2·p2 + w3·p3 + w4·p4) ) / divisor )
//! ```
//!
//! An agent with no recent updates scores `-inf` and ranks last.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use trialyx_common::ScoringConfig;
use trialyx_ingestion::NormalizedTrialRecord;

use crate::aggregate::distinct_agents;

pub const PHASE_2: &str = "Phase 2";
pub const PHASE_3: &str = "Phase 3";
pub const PHASE_4: &str = "Phase 4";

/// One row of the ranked activity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentActivityRow {
    #[serde(rename = "Active Agent")]
    pub agent: String,
    #[serde(rename = "Number Trials")]
    pub num_active_studies: usize,
    #[serde(rename = "Number Updates Last Week")]
    pub updates_last_week: usize,
    #[serde(rename = "Trials in Phase 2")]
    pub num_phase_2: usize,
    #[serde(rename = "Trials in Phase 3")]
    pub num_phase_3: usize,
    #[serde(rename = "Trials in Phase 4")]
    pub num_phase_4: usize,
    /// NaN when none of the agent's trials has an age range.
    #[serde(rename = "Min Age")]
    pub min_age: f64,
    #[serde(rename = "Max Age")]
    pub max_age: f64,
    #[serde(rename = "Score")]
    pub score: f64,
}

/// Score every agent against today's date.
pub fn score_agents(table: &[NormalizedTrialRecord], config: &ScoringConfig) -> Vec<AgentActivityRow> {
    let today = Local::now().date_naive();
    score_agents_at(table, config, today)
}

/// Score every agent with an explicit reference date.
#[instrument(skip(table, config), fields(rows = table.len()))]
pub fn score_agents_at(
    table: &[NormalizedTrialRecord],
    config: &ScoringConfig,
    today: NaiveDate,
) -> Vec<AgentActivityRow> {
    let cutoff = recency_cutoff(today, config.recency_window_days);
    let agents = distinct_agents(table);
    info!(agents = agents.len(), %today, %cutoff, "Scoring agents");

    let mut rows: Vec<AgentActivityRow> = agents
        .into_iter()
        .map(|agent| score_agent(table, agent, cutoff, config))
        .collect();

    rows.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));
    rows
}

fn score_agent(
    table: &[NormalizedTrialRecord],
    agent: String,
    cutoff: NaiveDate,
    config: &ScoringConfig,
) -> AgentActivityRow {
    let trials: Vec<&NormalizedTrialRecord> =
        table.iter().filter(|r| r.names_agent(&agent)).collect();

    let num_active_studies = trials.len();
    let updates_last_week = trials
        .iter()
        .filter(|r| r.last_update_posted.is_some_and(|d| d > cutoff))
        .count();
    let in_phase = |label: &str| trials.iter().filter(|r| r.has_phase(label)).count();
    let num_phase_2 = in_phase(PHASE_2);
    let num_phase_3 = in_phase(PHASE_3);
    let num_phase_4 = in_phase(PHASE_4);

    let ages: Vec<_> = trials.iter().filter_map(|r| r.age).collect();
    let min_age = ages.iter().map(|a| a.min).fold(f64::NAN, f64::min);
    let max_age = config.max_age_aggregation.fold(ages.iter().map(|a| a.max));

    let score = activity_score(
        num_active_studies,
        updates_last_week,
        [num_phase_2, num_phase_3, num_phase_4],
        config,
    );

    debug!(
        agent = %agent,
        num_active_studies,
        updates_last_week,
        num_phase_2,
        num_phase_3,
        num_phase_4,
        score,
        "Agent scored"
    );

    AgentActivityRow {
        agent,
        num_active_studies,
        updates_last_week,
        num_phase_2,
        num_phase_3,
        num_phase_4,
        min_age,
        max_age,
        score,
    }
}

/// Composite activity score. `trials` is always >= 1 for agents drawn from
/// the table; zero recent updates gives `-inf`.
pub fn activity_score(
    trials: usize,
    updates: usize,
    phases: [usize; 3],
    config: &ScoringConfig,
) -> f64 {
    debug_assert!(trials > 0, "scored agent must have at least one trial");
    let w = config.phase_weights.as_array();
    let weighted = w[0] * trials as f64
        + w[1] * phases[0] as f64
        + w[2] * phases[1] as f64
        + w[3] * phases[2] as f64;
    let activity = (updates as f64 / trials as f64) * weighted;
    round_to(activity.ln() / config.score_divisor, config.score_decimals)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `today - window_days`, saturating at the ends of the calendar.
fn recency_cutoff(today: NaiveDate, window_days: i64) -> NaiveDate {
    Duration::try_days(window_days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(if window_days >= 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// NaN sorts below every real score, including `-inf`.
fn sort_key(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}
