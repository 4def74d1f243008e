//! Intervention classification and agent-name extraction.
//!
//! The `Interventions` field is a pipe-delimited list such as
//! `"Drug: Hydroxychloroquine Sulfate|Drug: Placebo|Other: Standard of care"`.
//! Only `Drug:` segments name agents; other segments are ignored.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::InterventionType;

/// Marker that identifies a drug-type intervention.
pub const DRUG_MARKER: &str = "Drug";

const PLACEBO: &str = "Placebo";

/// Agents whose salt forms and combinations collapse to one canonical name,
/// in priority order.
const CANONICAL_AGENTS: &[&str] = &["Hydroxychloroquine", "Lopinavir"];

lazy_static! {
    static ref DRUG_SEGMENT: Regex = Regex::new(r"Drug:\s([\s\d\w]*)").unwrap();
}

/// Classify the intervention field. Missing input is `Other`.
pub fn classify_intervention(raw: Option<&str>) -> InterventionType {
    match raw {
        Some(s) if s.contains(DRUG_MARKER) => InterventionType::Drug,
        _ => InterventionType::Other,
    }
}

/// Extract the agents named in an intervention field, in source order.
///
/// Placebo segments are dropped, names containing a canonical agent are
/// replaced by that agent, and any other name is kept exactly as captured.
pub fn extract_agents(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split('|')
        .filter_map(|segment| DRUG_SEGMENT.captures(segment))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|name| !name.is_empty())
        .filter_map(normalise_agent_name)
        .collect()
}

fn normalise_agent_name(name: &str) -> Option<String> {
    if name.contains(PLACEBO) {
        return None;
    }
    let canonical = CANONICAL_AGENTS.iter().find(|agent| name.contains(**agent));
    Some(canonical.map_or_else(|| name.to_string(), |agent| agent.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify_intervention(None), InterventionType::Other);
        assert_eq!(classify_intervention(Some("Drug: Remdesivir")), InterventionType::Drug);
        assert_eq!(
            classify_intervention(Some("Biological: Convalescent plasma")),
            InterventionType::Other
        );
        assert_eq!(classify_intervention(Some("")), InterventionType::Other);
    }

    #[test]
    fn test_placebo_dropped_and_name_canonicalised() {
        assert_eq!(
            extract_agents(Some("Drug: Placebo|Drug: Hydroxychloroquine Sulfate")),
            vec!["Hydroxychloroquine"]
        );
    }

    #[test]
    fn test_lopinavir_combination() {
        assert_eq!(
            extract_agents(Some("Drug: Lopinavir/ritonavir|Drug: Interferon beta-1b")),
            vec!["Lopinavir", "Interferon beta"]
        );
    }

    #[test]
    fn test_non_drug_segments_ignored() {
        assert_eq!(
            extract_agents(Some("Other: Standard of care|Drug: Remdesivir|Device: Ventilator")),
            vec!["Remdesivir"]
        );
    }

    #[test]
    fn test_whitespace_kept_and_repeats_preserved() {
        assert_eq!(
            extract_agents(Some("Drug: Favipiravir |Drug: Favipiravir ")),
            vec!["Favipiravir ", "Favipiravir "]
        );
    }

    #[test]
    fn test_missing_and_empty_names() {
        assert!(extract_agents(None).is_empty());
        assert!(extract_agents(Some("Drug: ")).is_empty());
        assert!(extract_agents(Some("Procedure: Prone positioning")).is_empty());
    }

    #[test]
    fn test_hydroxychloroquine_takes_priority_over_lopinavir() {
        assert_eq!(
            extract_agents(Some("Drug: Hydroxychloroquine and Lopinavir")),
            vec!["Hydroxychloroquine"]
        );
    }
}
