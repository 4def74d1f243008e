//! Agent × agent co-occurrence matrix.
//!
//! A single-agent trial adds a self-pair `(a, a)`. A multi-agent trial adds
//! every unordered positional pair. Counts are symmetrised as
//! `M + Mᵀ - diag(M)` and zero cells are reported as no data.

use indexmap::IndexSet;
use tracing::debug;
use trialyx_ingestion::NormalizedTrialRecord;

use crate::aggregate::distinct_agents;

#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    /// Axis labels, in distinct-agent order.
    pub labels: Vec<String>,
    /// Row-major counts; `None` marks a cell with no co-occurrence.
    pub cells: Vec<Vec<Option<u64>>>,
}

impl CooccurrenceMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, agent: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == agent)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<u64> {
        self.cells.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Count for a pair of agents by name.
    pub fn count(&self, a: &str, b: &str) -> Option<u64> {
        self.get(self.index_of(a)?, self.index_of(b)?)
    }

    /// False for a ragged matrix rather than panicking.
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        if self.cells.len() != n || self.cells.iter().any(|row| row.len() != n) {
            return false;
        }
        (0..n).all(|i| (0..n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Label-prefixed rows for tabular output, with an empty cell for no data.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut header = vec![String::new()];
        header.extend(self.labels.iter().cloned());

        let mut rows = vec![header];
        for (label, cells) in self.labels.iter().zip(&self.cells) {
            let mut row = vec![label.clone()];
            row.extend(cells.iter().map(|c| c.map(|v| v.to_string()).unwrap_or_default()));
            rows.push(row);
        }
        rows
    }
}

/// Build the co-occurrence matrix for a normalised table.
pub fn build_cooccurrence(table: &[NormalizedTrialRecord]) -> CooccurrenceMatrix {
    let labels = distinct_agents(table);
    let n = labels.len();
    let axis: IndexSet<&str> = labels.iter().map(String::as_str).collect();

    let mut counts = vec![vec![0u64; n]; n];
    let mut pairs = 0usize;
    for record in table {
        for (a, b) in agent_pairs(&record.drugs) {
            if let (Some(i), Some(j)) = (axis.get_index_of(a), axis.get_index_of(b)) {
                counts[i][j] += 1;
                pairs += 1;
            }
        }
    }

    let cells = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let total = if i == j { counts[i][i] } else { counts[i][j] + counts[j][i] };
                    (total != 0).then_some(total)
                })
                .collect()
        })
        .collect();

    debug!(agents = n, pairs, "Co-occurrence matrix built");
    CooccurrenceMatrix { labels, cells }
}

fn agent_pairs(drugs: &[String]) -> Vec<(&str, &str)> {
    match drugs {
        [] => Vec::new(),
        [only] => vec![(only.as_str(), only.as_str())],
        _ => drugs
            .iter()
            .enumerate()
            .flat_map(|(i, a)| drugs[i + 1..].iter().map(move |b| (a.as_str(), b.as_str())))
            .collect(),
    }
}
