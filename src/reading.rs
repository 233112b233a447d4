use chrono::{DateTime, Utc};
use serde::Deserialize;

// Shape of one `/air-data/latest` response. Measurement fields the monitor
// omits decode to zero; the source timestamp is required.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub dew_point: f64,
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub humid: f64,
    #[serde(default)]
    pub abs_humid: f64,
    #[serde(default)]
    pub co2: i64,
    #[serde(default)]
    pub co2_est: i64,
    #[serde(default)]
    pub co2_est_baseline: i64,
    #[serde(default)]
    pub voc: i64,
    #[serde(default)]
    pub voc_baseline: i64,
    #[serde(default)]
    pub voc_h2_raw: i64,
    #[serde(default)]
    pub voc_ethanol_raw: i64,
    #[serde(default)]
    pub pm25: i64,
    #[serde(default)]
    pub pm10_est: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredRow {
    pub name: String,
    pub reading: Reading,
}
