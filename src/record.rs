//! CSV row types for raw and engineered trip records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::FareClass;

/// Serde adapter for the TLC timestamp format, e.g. `2019-01-15 10:23:45`.
pub mod tlc_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A single raw trip row as read from a TLC yellow-taxi CSV extract.
///
/// Field names and renames follow the 2019 upstream header. Read-only input:
/// nothing downstream mutates a `TripRecord` once parsed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TripRecord {
    #[serde(rename = "VendorID")]
    pub vendor_id: u8,
    #[serde(with = "tlc_datetime")]
    pub tpep_pickup_datetime: NaiveDateTime,
    #[serde(with = "tlc_datetime")]
    pub tpep_dropoff_datetime: NaiveDateTime,
    pub passenger_count: u8,
    pub trip_distance: f64,
    #[serde(rename = "RatecodeID")]
    pub ratecode_id: u8,
    pub store_and_fwd_flag: String,
    #[serde(rename = "PULocationID")]
    pub pu_location_id: u16,
    #[serde(rename = "DOLocationID")]
    pub do_location_id: u16,
    pub payment_type: u8,
    pub fare_amount: f64,
    pub extra: f64,
    pub mta_tax: f64,
    pub tip_amount: f64,
    pub tolls_amount: f64,
    pub improvement_surcharge: f64,
    pub total_amount: f64,
    // Absent in early extracts
    #[serde(default)]
    pub congestion_surcharge: Option<f64>,
}

/// One engineered row: every raw column retained, followed by per-record
/// derived columns and corpus-wide aggregate columns.
///
/// Aggregate columns (`mean_*`, `*_p25`/`p50`/`p75`, `monthly_mean_distance`
/// for a given month) carry the same values on every row of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    // Raw columns, unchanged
    #[serde(rename = "VendorID")]
    pub vendor_id: u8,
    #[serde(with = "tlc_datetime")]
    pub tpep_pickup_datetime: NaiveDateTime,
    #[serde(with = "tlc_datetime")]
    pub tpep_dropoff_datetime: NaiveDateTime,
    pub passenger_count: u8,
    pub trip_distance: f64,
    #[serde(rename = "RatecodeID")]
    pub ratecode_id: u8,
    pub store_and_fwd_flag: String,
    #[serde(rename = "PULocationID")]
    pub pu_location_id: u16,
    #[serde(rename = "DOLocationID")]
    pub do_location_id: u16,
    pub payment_type: u8,
    pub fare_amount: f64,
    pub extra: f64,
    pub mta_tax: f64,
    pub tip_amount: f64,
    pub tolls_amount: f64,
    pub improvement_surcharge: f64,
    pub total_amount: f64,
    pub congestion_surcharge: Option<f64>,

    // Per-record derived columns
    pub pickup_hour: u32,
    pub pickup_day_of_week: u32,
    pub pickup_day_of_month: u32,
    pub pickup_month: u32,
    pub dropoff_hour: u32,
    pub dropoff_day_of_week: u32,
    pub dropoff_day_of_month: u32,
    pub dropoff_month: u32,
    pub pickup_seconds: u32,
    pub dropoff_seconds: u32,
    pub trip_duration_min: f64,
    pub average_speed_mph: f64,
    pub fare_class: FareClass,
    pub distance_band: u8,
    pub fare_band: u8,

    // Corpus-wide aggregate columns
    pub monthly_mean_distance: f64,
    pub mean_extra: f64,
    pub mean_mta_tax: f64,
    pub mean_tolls: f64,
    pub distance_p25: f64,
    pub distance_p50: f64,
    pub distance_p75: f64,
    pub fare_p25: f64,
    pub fare_p50: f64,
    pub fare_p75: f64,
}
