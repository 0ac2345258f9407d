use crate::domain::entities::price_row::PriceRow;
use crate::domain::ports::price_provider::{ClosePoint, OhlcPoint};
use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;

/// Truncate an epoch-millisecond timestamp to its UTC calendar day. Explicit
/// UTC arithmetic, never a locale-dependent string slice.
pub fn floor_to_day_utc(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Snapshot shape: one close-only row stamped with the supplied "today".
pub fn normalize_snapshot(asset_id: &str, today: NaiveDate, price: f64) -> PriceRow {
    PriceRow::from_close(asset_id, today, price)
}

/// Close-series shape: collapse intraday points to one row per UTC day. The
/// input is provider-chronological, so the last point seen for a day is the
/// latest sample and wins; open/high/low collapse to that close. Output is
/// ordered by date ascending.
pub fn normalize_close_series(asset_id: &str, points: &[ClosePoint]) -> Vec<PriceRow> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in points {
        match floor_to_day_utc(point.timestamp_ms) {
            Some(date) => {
                by_date.insert(date, point.close);
            }
            None => {
                eprintln!(
                    "Warning: skipping close point with invalid timestamp {}",
                    point.timestamp_ms
                );
            }
        }
    }

    by_date
        .into_iter()
        .map(|(date, close)| PriceRow::from_close(asset_id, date, close))
        .collect()
}

/// OHLC-series shape: the provider already buckets by day, so this is one row
/// per candle. Two candles on the same day should not occur, but when they do
/// the last one in input order wins outright (no field-wise merge). Output is
/// ordered by date ascending.
pub fn normalize_ohlc_series(asset_id: &str, points: &[OhlcPoint]) -> Vec<PriceRow> {
    let mut by_date: BTreeMap<NaiveDate, PriceRow> = BTreeMap::new();
    for point in points {
        match floor_to_day_utc(point.timestamp_ms) {
            Some(date) => {
                by_date.insert(
                    date,
                    PriceRow {
                        asset_id: asset_id.to_string(),
                        date,
                        open: point.open,
                        high: point.high,
                        low: point.low,
                        close: point.close,
                        volume: None,
                    },
                );
            }
            None => {
                eprintln!(
                    "Warning: skipping OHLC point with invalid timestamp {}",
                    point.timestamp_ms
                );
            }
        }
    }

    by_date.into_values().collect()
}
