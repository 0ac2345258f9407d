use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical per-day price observation. At most one row may exist per
/// (asset_id, date); the upsert writer replaces all price fields on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub asset_id: String,
    /// UTC calendar day.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceRow {
    /// Row derived from a single close-only observation: open/high/low all
    /// collapse to the close, volume unknown.
    pub fn from_close(asset_id: &str, date: NaiveDate, close: f64) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }
}
