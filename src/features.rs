//! Feature derivation: per-record temporal fields plus broadcast corpus
//! aggregates.

use chrono::{Datelike, Timelike};
use tracing::debug;

use crate::classify::classify;
use crate::error::PipelineError;
use crate::record::{FeatureRecord, TripRecord};
use crate::stats::{CorpusStats, band};

/// Derives a [`FeatureRecord`] for every input record, preserving order.
///
/// Aggregate statistics are computed once over the full input and broadcast
/// to every row. Deterministic: identical input yields identical output.
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] for empty input and
/// [`PipelineError::Domain`] if a negative fare reaches classification
/// (cleaning removes these, so this only fires on un-cleaned input).
pub fn engineer(records: &[TripRecord]) -> Result<Vec<FeatureRecord>, PipelineError> {
    let stats = CorpusStats::from_records(records);
    engineer_with_stats(records, &stats)
}

/// Same as [`engineer`], but broadcasting pre-computed statistics. Lets the
/// caller reuse the statistics for run reporting without a second pass.
pub fn engineer_with_stats(
    records: &[TripRecord],
    stats: &CorpusStats,
) -> Result<Vec<FeatureRecord>, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::Validation(
            "no trip records to engineer".to_string(),
        ));
    }

    debug!(rows = records.len(), "Deriving features");
    records.iter().map(|r| derive(r, stats)).collect()
}

fn derive(r: &TripRecord, stats: &CorpusStats) -> Result<FeatureRecord, PipelineError> {
    let fare_class = classify(r.fare_amount)?;

    let pickup = r.tpep_pickup_datetime;
    let dropoff = r.tpep_dropoff_datetime;

    let trip_duration_min = (dropoff - pickup).num_seconds() as f64 / 60.0;
    // Zero-duration trips get speed 0 rather than a division blow-up
    let average_speed_mph = if trip_duration_min > 0.0 {
        r.trip_distance / (trip_duration_min / 60.0)
    } else {
        0.0
    };

    Ok(FeatureRecord {
        vendor_id: r.vendor_id,
        tpep_pickup_datetime: pickup,
        tpep_dropoff_datetime: dropoff,
        passenger_count: r.passenger_count,
        trip_distance: r.trip_distance,
        ratecode_id: r.ratecode_id,
        store_and_fwd_flag: r.store_and_fwd_flag.clone(),
        pu_location_id: r.pu_location_id,
        do_location_id: r.do_location_id,
        payment_type: r.payment_type,
        fare_amount: r.fare_amount,
        extra: r.extra,
        mta_tax: r.mta_tax,
        tip_amount: r.tip_amount,
        tolls_amount: r.tolls_amount,
        improvement_surcharge: r.improvement_surcharge,
        total_amount: r.total_amount,
        congestion_surcharge: r.congestion_surcharge,

        pickup_hour: pickup.hour(),
        pickup_day_of_week: pickup.weekday().num_days_from_monday(),
        pickup_day_of_month: pickup.day(),
        pickup_month: pickup.month(),
        dropoff_hour: dropoff.hour(),
        dropoff_day_of_week: dropoff.weekday().num_days_from_monday(),
        dropoff_day_of_month: dropoff.day(),
        dropoff_month: dropoff.month(),
        pickup_seconds: pickup.num_seconds_from_midnight(),
        dropoff_seconds: dropoff.num_seconds_from_midnight(),
        trip_duration_min,
        average_speed_mph,
        fare_class,
        distance_band: band(&stats.distance_quartiles, r.trip_distance),
        fare_band: band(&stats.fare_quartiles, r.fare_amount),

        monthly_mean_distance: stats.monthly_mean_distance(pickup.month()),
        mean_extra: stats.mean_extra,
        mean_mta_tax: stats.mean_mta_tax,
        mean_tolls: stats.mean_tolls,
        distance_p25: stats.distance_quartiles[0],
        distance_p50: stats.distance_quartiles[1],
        distance_p75: stats.distance_quartiles[2],
        fare_p25: stats.fare_quartiles[0],
        fare_p50: stats.fare_quartiles[1],
        fare_p75: stats.fare_quartiles[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FareClass;
    use chrono::NaiveDate;

    fn trip(day: u32, hour: u32, distance: f64, fare: f64, duration_secs: i64) -> TripRecord {
        let pickup = NaiveDate::from_ymd_opt(2019, 1, day)
            .unwrap()
            .and_hms_opt(hour, 15, 30)
            .unwrap();
        TripRecord {
            vendor_id: 2,
            tpep_pickup_datetime: pickup,
            tpep_dropoff_datetime: pickup + chrono::Duration::seconds(duration_secs),
            passenger_count: 1,
            trip_distance: distance,
            ratecode_id: 1,
            store_and_fwd_flag: "N".to_string(),
            pu_location_id: 151,
            do_location_id: 239,
            payment_type: 1,
            fare_amount: fare,
            extra: 0.5,
            mta_tax: 0.5,
            tip_amount: 1.0,
            tolls_amount: 0.0,
            improvement_surcharge: 0.3,
            total_amount: fare + 2.3,
            congestion_surcharge: Some(2.5),
        }
    }

    #[test]
    fn test_empty_input_is_validation_error() {
        assert!(matches!(
            engineer(&[]),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_temporal_fields() {
        let records = vec![trip(15, 10, 3.0, 14.5, 900)];
        let features = engineer(&records).unwrap();
        let f = &features[0];

        // 2019-01-15 was a Tuesday
        assert_eq!(f.pickup_hour, 10);
        assert_eq!(f.pickup_day_of_week, 1);
        assert_eq!(f.pickup_day_of_month, 15);
        assert_eq!(f.pickup_month, 1);
        assert_eq!(f.pickup_seconds, 10 * 3600 + 15 * 60 + 30);
        assert_eq!(f.dropoff_seconds, f.pickup_seconds + 900);
        assert!((f.trip_duration_min - 15.0).abs() < 1e-9);
        assert!((f.average_speed_mph - 12.0).abs() < 1e-9);
        assert_eq!(f.fare_class, FareClass::Medium);
    }

    #[test]
    fn test_zero_duration_trip_yields_zero_speed() {
        let records = vec![trip(15, 10, 1.0, 8.0, 0)];
        let features = engineer(&records).unwrap();
        let f = &features[0];

        assert_eq!(f.trip_duration_min, 0.0);
        assert_eq!(f.average_speed_mph, 0.0);
        assert_eq!(f.pickup_seconds, f.dropoff_seconds);
    }

    #[test]
    fn test_aggregates_identical_across_rows() {
        let records = vec![
            trip(1, 8, 1.0, 5.0, 300),
            trip(10, 12, 3.0, 15.0, 900),
            trip(20, 18, 9.0, 35.0, 2400),
        ];
        let features = engineer(&records).unwrap();

        let first = &features[0];
        for f in &features {
            assert_eq!(f.mean_extra, first.mean_extra);
            assert_eq!(f.mean_mta_tax, first.mean_mta_tax);
            assert_eq!(f.mean_tolls, first.mean_tolls);
            assert_eq!(f.distance_p50, first.distance_p50);
            assert_eq!(f.fare_p50, first.fare_p50);
            // All pickups share January here
            assert_eq!(f.monthly_mean_distance, first.monthly_mean_distance);
        }
    }

    #[test]
    fn test_order_preserved_and_raw_fields_untouched() {
        let records = vec![
            trip(1, 8, 1.1, 5.0, 300),
            trip(2, 9, 2.2, 15.0, 600),
            trip(3, 10, 3.3, 35.0, 900),
        ];
        let features = engineer(&records).unwrap();

        assert_eq!(features.len(), records.len());
        for (r, f) in records.iter().zip(&features) {
            assert_eq!(f.trip_distance, r.trip_distance);
            assert_eq!(f.fare_amount, r.fare_amount);
            assert_eq!(f.tpep_pickup_datetime, r.tpep_pickup_datetime);
        }
    }

    #[test]
    fn test_deterministic_on_identical_input() {
        let records = vec![trip(5, 7, 2.0, 12.0, 600), trip(6, 22, 4.0, 28.0, 1500)];
        assert_eq!(engineer(&records).unwrap(), engineer(&records).unwrap());
    }

    #[test]
    fn test_negative_fare_surfaces_domain_error() {
        let records = vec![trip(5, 7, 2.0, -12.0, 600)];
        assert!(matches!(
            engineer(&records),
            Err(PipelineError::Domain(_))
        ));
    }
}
