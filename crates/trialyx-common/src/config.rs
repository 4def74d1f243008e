//! Configuration for the agent-activity scoring run.
//!
//! Reads trialyx.toml from the current directory or the path in the
//! TRIALYX_CONFIG env var. YAML and JSON files are accepted too.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TrialyxError};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialyxConfig {
    /// Scoring engine parameters
    #[serde(default)]
    pub scoring: ScoringConfig,
}

// ── Scoring Configuration ─────────────────────────────────────────────────────

/// How the `Max Age` column folds the upper age bounds of an agent's trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeAggregation {
    /// Smallest upper bound. Matches the historical score tables.
    #[default]
    Min,
    /// Largest upper bound.
    Max,
}

impl AgeAggregation {
    pub fn fold(self, values: impl Iterator<Item = f64>) -> f64 {
        let init = match self {
            AgeAggregation::Min => f64::INFINITY,
            AgeAggregation::Max => f64::NEG_INFINITY,
        };
        let mut seen = false;
        let folded = values.fold(init, |acc, v| {
            seen = true;
            match self {
                AgeAggregation::Min => acc.min(v),
                AgeAggregation::Max => acc.max(v),
            }
        });
        if seen { folded } else { f64::NAN }
    }
}

/// Multipliers applied to trial counts inside the activity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseWeights {
    /// Weight of the total active-trial count
    #[serde(default = "default_trials_weight")]
    pub trials: f64,
    #[serde(default = "default_phase_2_weight")]
    pub phase_2: f64,
    #[serde(default = "default_phase_3_weight")]
    pub phase_3: f64,
    #[serde(default = "default_phase_4_weight")]
    pub phase_4: f64,
}

fn default_trials_weight() -> f64 { 1.0 }
fn default_phase_2_weight() -> f64 { 2.0 }
fn default_phase_3_weight() -> f64 { 3.0 }
fn default_phase_4_weight() -> f64 { 4.0 }

impl Default for PhaseWeights {
    fn default() -> Self {
        Self {
            trials: default_trials_weight(),
            phase_2: default_phase_2_weight(),
            phase_3: default_phase_3_weight(),
            phase_4: default_phase_4_weight(),
        }
    }
}

impl PhaseWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [self.trials, self.phase_2, self.phase_3, self.phase_4]
    }
}

/// Scoring engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// A trial counts as recently updated if its last update is strictly
    /// after `today - recency_window_days`
    #[serde(default = "default_recency_window")]
    pub recency_window_days: i64,

    /// The log-activity term is divided by this before rounding
    #[serde(default = "default_score_divisor")]
    pub score_divisor: f64,

    /// Decimal places kept in the final score
    #[serde(default = "default_score_decimals")]
    pub score_decimals: u32,

    #[serde(default)]
    pub phase_weights: PhaseWeights,

    #[serde(default)]
    pub max_age_aggregation: AgeAggregation,
}

fn default_recency_window() -> i64 { 7 }
fn default_score_divisor() -> f64 { 6.0 }
fn default_score_decimals() -> u32 { 2 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recency_window_days: default_recency_window(),
            score_divisor: default_score_divisor(),
            score_decimals: default_score_decimals(),
            phase_weights: PhaseWeights::default(),
            max_age_aggregation: AgeAggregation::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.recency_window_days < 0 {
            return Err(TrialyxError::Config(format!(
                "recency_window_days must be >= 0, got {}",
                self.recency_window_days
            )));
        }
        if !(self.score_divisor > 0.0) {
            return Err(TrialyxError::Config(format!(
                "score_divisor must be > 0, got {}",
                self.score_divisor
            )));
        }
        if self.phase_weights.as_array().iter().any(|w| !(*w >= 0.0)) {
            return Err(TrialyxError::Config(
                "phase weights must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl TrialyxConfig {
    /// Load configuration from trialyx.toml.
    /// Checks TRIALYX_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("TRIALYX_CONFIG")
            .unwrap_or_else(|_| "trialyx.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!("Config file not found: {}", path);
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path, "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.scoring.validate()?;
        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
