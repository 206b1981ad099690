//! Corpus-wide aggregate statistics computed once per pipeline run.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::record::TripRecord;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Linear-interpolation percentile over an ascending-sorted slice.
/// `p` is in percent, clamped to [0, 100]. Returns 0.0 for empty input.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Dataset-wide statistics over a cleaned corpus, broadcast to every output
/// row. Identical input yields identical statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub mean_extra: f64,
    pub mean_mta_tax: f64,
    pub mean_tolls: f64,
    pub mean_distance: f64,
    pub stddev_distance: f64,
    pub mean_fare: f64,
    pub stddev_fare: f64,
    /// p25 / p50 / p75 of trip distance.
    pub distance_quartiles: [f64; 3],
    /// p25 / p50 / p75 of fare amount.
    pub fare_quartiles: [f64; 3],
    /// Mean trip distance keyed by pickup month (1–12).
    pub monthly_mean_distance: BTreeMap<u32, f64>,
}

impl CorpusStats {
    pub fn from_records(records: &[TripRecord]) -> Self {
        use chrono::Datelike;

        let extras: Vec<f64> = records.iter().map(|r| r.extra).collect();
        let mta_taxes: Vec<f64> = records.iter().map(|r| r.mta_tax).collect();
        let tolls: Vec<f64> = records.iter().map(|r| r.tolls_amount).collect();

        let mut distances: Vec<f64> = records.iter().map(|r| r.trip_distance).collect();
        let mut fares: Vec<f64> = records.iter().map(|r| r.fare_amount).collect();

        let mean_distance = mean(&distances);
        let mean_fare = mean(&fares);
        let stddev_distance = stddev(&distances, mean_distance);
        let stddev_fare = stddev(&fares, mean_fare);

        distances.sort_by(f64::total_cmp);
        fares.sort_by(f64::total_cmp);

        let mut per_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for r in records {
            per_month
                .entry(r.tpep_pickup_datetime.month())
                .or_default()
                .push(r.trip_distance);
        }
        let monthly_mean_distance = per_month
            .into_iter()
            .map(|(month, values)| (month, mean(&values)))
            .collect();

        CorpusStats {
            mean_extra: mean(&extras),
            mean_mta_tax: mean(&mta_taxes),
            mean_tolls: mean(&tolls),
            mean_distance,
            stddev_distance,
            mean_fare,
            stddev_fare,
            distance_quartiles: quartiles(&distances),
            fare_quartiles: quartiles(&fares),
            monthly_mean_distance,
        }
    }

    /// Mean trip distance for a pickup month, 0.0 when the month is absent
    /// from the corpus.
    pub fn monthly_mean_distance(&self, month: u32) -> f64 {
        self.monthly_mean_distance.get(&month).copied().unwrap_or(0.0)
    }
}

fn quartiles(sorted: &[f64]) -> [f64; 3] {
    [
        percentile(sorted, 25.0),
        percentile(sorted, 50.0),
        percentile(sorted, 75.0),
    ]
}

/// Quartile band (1–4) of a value against pre-computed p25/p50/p75.
pub fn band(quartiles: &[f64; 3], value: f64) -> u8 {
    if value < quartiles[0] {
        1
    } else if value < quartiles[1] {
        2
    } else if value < quartiles[2] {
        3
    } else {
        4
    }
}
