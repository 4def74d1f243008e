//! Trial phase list extraction.

/// Split a pipe-delimited phase field ("Phase 2|Phase 3") into its labels.
/// Labels are kept verbatim; a missing field yields no phases.
pub fn extract_phases(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) => s.split('|').map(str::to_string).collect(),
        None => Vec::new(),
    }
}
