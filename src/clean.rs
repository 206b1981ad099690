//! Validation pass over raw trip records.
//!
//! Structurally invalid rows are dropped, never imputed; every drop is
//! counted per reason so a run can document exactly what it discarded.

use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::record::TripRecord;

/// Per-reason drop accounting for a single cleaning pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub kept: usize,
    pub nonpositive_distance: usize,
    pub nonpositive_fare: usize,
    pub dropoff_before_pickup: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.input_rows - self.kept
    }
}

/// Drops records with non-positive trip distance, non-positive fare amount,
/// or a dropoff timestamp strictly earlier than the pickup timestamp.
///
/// A zero-duration trip (pickup == dropoff) is retained; its derived
/// duration fields come out as 0 downstream. Retained records pass through
/// unaltered and in input order.
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] when the input is empty.
pub fn clean(records: Vec<TripRecord>) -> Result<(Vec<TripRecord>, CleanReport), PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::Validation(
            "no trip records to clean".to_string(),
        ));
    }

    let mut report = CleanReport {
        input_rows: records.len(),
        ..CleanReport::default()
    };

    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        if record.trip_distance <= 0.0 || !record.trip_distance.is_finite() {
            report.nonpositive_distance += 1;
            continue;
        }
        if record.fare_amount <= 0.0 || !record.fare_amount.is_finite() {
            report.nonpositive_fare += 1;
            continue;
        }
        if record.tpep_dropoff_datetime < record.tpep_pickup_datetime {
            report.dropoff_before_pickup += 1;
            continue;
        }
        kept.push(record);
    }

    report.kept = kept.len();

    info!(
        input_rows = report.input_rows,
        kept = report.kept,
        dropped = report.dropped(),
        nonpositive_distance = report.nonpositive_distance,
        nonpositive_fare = report.nonpositive_fare,
        dropoff_before_pickup = report.dropoff_before_pickup,
        "Cleaning pass complete"
    );

    Ok((kept, report))
}
