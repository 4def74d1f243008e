//! Record normalisation pipeline.
//!
//! Applies the field extractors to every row of a raw registry table and
//! returns a new table. Row count and row order are preserved; columns the
//! pipeline does not own pass through unchanged. The input is never mutated.

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};
use trialyx_common::{Result, TrialyxError};

use crate::models::{DateColumn, NormalizedTrialRecord, RawTrialRecord};
use crate::normalise::{
    classify_intervention, extract_age_range, extract_agents, extract_phases, parse_date,
};

/// Normalise a whole table. The first unparseable date aborts the run.
#[instrument(skip(raw_table), fields(rows = raw_table.len()))]
pub fn normalize_table(raw_table: &[RawTrialRecord]) -> Result<Vec<NormalizedTrialRecord>> {
    info!("Normalising {} registry records", raw_table.len());

    let table = raw_table
        .iter()
        .enumerate()
        .map(|(row, raw)| normalize_record(row, raw))
        .collect::<Result<Vec<_>>>()?;

    let drug_trials = table.iter().filter(|r| !r.drugs.is_empty()).count();
    info!(
        rows = table.len(),
        drug_trials,
        "Normalisation complete"
    );
    Ok(table)
}

/// Normalise a single row. `row` is only used for error context.
pub fn normalize_record(row: usize, raw: &RawTrialRecord) -> Result<NormalizedTrialRecord> {
    let age = raw.age.as_deref().and_then(extract_age_range);
    if age.is_none() {
        if let Some(text) = raw.age.as_deref() {
            debug!(row, age = text, "No age range recognised");
        }
    }

    Ok(NormalizedTrialRecord {
        completion_date: date_field(row, raw, DateColumn::CompletionDate)?,
        first_posted: date_field(row, raw, DateColumn::FirstPosted)?,
        results_first_posted: date_field(row, raw, DateColumn::ResultsFirstPosted)?,
        last_update_posted: date_field(row, raw, DateColumn::LastUpdatePosted)?,
        age,
        phases: extract_phases(raw.phases.as_deref()),
        interventions: raw.interventions.clone(),
        intervention_type: classify_intervention(raw.interventions.as_deref()),
        drugs: extract_agents(raw.interventions.as_deref()),
        other: raw.other.clone(),
    })
}

fn date_field(row: usize, raw: &RawTrialRecord, column: DateColumn) -> Result<Option<NaiveDate>> {
    let Some(text) = column.raw(raw) else {
        return Ok(None);
    };
    match parse_date(text) {
        Ok(date) => Ok(Some(date)),
        Err(source) => {
            warn!(row, column = column.as_str(), value = text, "Unparseable date");
            Err(TrialyxError::Normalise {
                row,
                column: column.as_str(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, InterventionType};
    use pretty_assertions::assert_eq;

    fn raw(interventions: Option<&str>, phases: Option<&str>, age: Option<&str>) -> RawTrialRecord {
        RawTrialRecord {
            interventions: interventions.map(str::to_string),
            phases: phases.map(str::to_string),
            age: age.map(str::to_string),
            first_posted: Some("March 20, 2020".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_preserves_row_count_and_order() {
        let table = vec![
            raw(Some("Drug: Remdesivir"), Some("Phase 3"), Some("12 Years and older")),
            raw(None, None, None),
            raw(Some("Drug: Placebo|Drug: Hydroxychloroquine Sulfate"), Some("Phase 2|Phase 3"), Some("Adult")),
        ];
        let out = normalize_table(&table).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].drugs, vec!["Remdesivir"]);
        assert!(out[1].drugs.is_empty());
        assert_eq!(out[2].drugs, vec!["Hydroxychloroquine"]);
        assert_eq!(out[2].phases, vec!["Phase 2", "Phase 3"]);
    }

    #[test]
    fn test_typed_fields() {
        let out = normalize_record(0, &raw(Some("Drug: Remdesivir"), None, Some("18 Years to 45 Years"))).unwrap();
        assert_eq!(out.age, Some(AgeRange::new(18.0, 45.0)));
        assert_eq!(out.intervention_type, InterventionType::Drug);
        assert_eq!(out.first_posted, NaiveDate::from_ymd_opt(2020, 3, 20));
        assert_eq!(out.completion_date, None);
        assert!(out.phases.is_empty());
        assert_eq!(out.interventions.as_deref(), Some("Drug: Remdesivir"));
    }

    #[test]
    fn test_other_columns_pass_through() {
        let mut rec = raw(None, None, None);
        rec.other.insert("NCT Number".to_string(), Some("NCT04280705".to_string()));
        rec.other.insert("Outcome Measures".to_string(), None);
        let out = normalize_record(0, &rec).unwrap();
        assert_eq!(out.other, rec.other);
        assert_eq!(out.intervention_type, InterventionType::Other);
    }

    #[test]
    fn test_bad_date_reports_row_and_column() {
        let mut bad = raw(None, None, None);
        bad.last_update_posted = Some("not a date".to_string());
        let table = vec![raw(None, None, None), bad];

        let err = normalize_table(&table).unwrap_err();
        match err {
            TrialyxError::Normalise { row, column, source } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Last Update Posted");
                assert_eq!(source.value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let table = vec![raw(Some("Drug: Lopinavir/ritonavir"), Some("Phase 4"), None)];
        let before = table.clone();
        let _ = normalize_table(&table).unwrap();
        assert_eq!(table, before);
    }
}
