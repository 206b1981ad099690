//! CSV ingestion for raw trip extracts.

use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::record::TripRecord;

/// Parsed rows plus the count of rows that failed typed deserialization.
#[derive(Debug)]
pub struct ReadOutcome {
    pub records: Vec<TripRecord>,
    pub unparsed_rows: usize,
}

impl ReadOutcome {
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.unparsed_rows
    }
}

/// Reads a headered trip CSV. Rows that fail to parse as [`TripRecord`]
/// (missing fields, untypable values) are skipped and counted.
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] when the file cannot be opened,
/// contains no data rows, or no row at all parses (wrong header or schema).
pub fn read_trips(path: &Path) -> Result<ReadOutcome, PipelineError> {
    let file = File::open(path).map_err(|e| {
        PipelineError::Validation(format!("cannot open {}: {e}", path.display()))
    })?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    let mut unparsed_rows = 0usize;
    let mut total = 0usize;

    for result in rdr.deserialize() {
        total += 1;
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                unparsed_rows += 1;
                debug!(row = total, error = %e, "Row failed to parse, skipping");
            }
        }
    }

    if total == 0 {
        return Err(PipelineError::Validation(format!(
            "{} contains no data rows",
            path.display()
        )));
    }
    if records.is_empty() {
        return Err(PipelineError::Validation(format!(
            "no row in {} parsed as trip data; wrong header or column types?",
            path.display()
        )));
    }

    if unparsed_rows > 0 {
        warn!(unparsed_rows, total, "Some rows failed to parse");
    }
    debug!(parsed = records.len(), unparsed_rows, "CSV read complete");

    Ok(ReadOutcome {
        records,
        unparsed_rows,
    })
}
