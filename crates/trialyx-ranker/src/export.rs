//! CSV export of output tables.
//!
//! Every output row type serialises with its published column names, so a
//! table can be handed to any downstream consumer as-is.

use std::io::Write;

use serde::Serialize;
use trialyx_common::{Result, TrialyxError};

use crate::cooccurrence::CooccurrenceMatrix;

/// Write rows as CSV with a header line.
pub fn write_csv<W: Write, T: Serialize>(rows: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a co-occurrence matrix; no-data cells are left empty.
pub fn write_matrix_csv<W: Write>(matrix: &CooccurrenceMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in matrix.to_rows() {
        wtr.write_record(&row).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> TrialyxError {
    TrialyxError::Csv(e.to_string())
}
