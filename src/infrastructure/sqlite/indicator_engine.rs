use crate::domain::error::DomainError;
use crate::domain::ports::indicator_engine::IndicatorEngine;
use crate::domain::values::recompute_window::RecomputeWindow;
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// Datastore-side indicator recompute: one SQL statement regenerating the
/// daily_indicators rows inside the window. The formulas live in the SQL;
/// the rest of the pipeline treats this as a black box keyed by
/// (asset, start, end), all three nullable.
pub struct SqliteIndicatorEngine {
    conn: Mutex<Connection>,
}

impl SqliteIndicatorEngine {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl IndicatorEngine for SqliteIndicatorEngine {
    fn recompute(&self, window: &RecomputeWindow) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // Moving averages are taken over the full per-asset series, then the
        // write-back is clipped to the requested window so rows outside it
        // are never touched.
        conn.execute(
            "INSERT INTO daily_indicators (asset_id, date, sma_7, sma_14)
             SELECT asset_id, date, sma_7, sma_14 FROM (
                 SELECT asset_id, date,
                        AVG(close) OVER w7 AS sma_7,
                        AVG(close) OVER w14 AS sma_14
                 FROM price_history
                 WHERE (?1 IS NULL OR asset_id = ?1)
                 WINDOW w7 AS (PARTITION BY asset_id ORDER BY date
                               ROWS BETWEEN 6 PRECEDING AND CURRENT ROW),
                        w14 AS (PARTITION BY asset_id ORDER BY date
                                ROWS BETWEEN 13 PRECEDING AND CURRENT ROW)
             )
             WHERE (?2 IS NULL OR date >= ?2) AND (?3 IS NULL OR date <= ?3)
             ON CONFLICT(asset_id, date) DO UPDATE SET
                 sma_7 = excluded.sma_7,
                 sma_14 = excluded.sma_14",
            params![
                window.asset_id,
                window.start.map(|d| d.to_string()),
                window.end.map(|d| d.to_string()),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Indicator recompute failed: {e}")))?;
        Ok(())
    }
}
