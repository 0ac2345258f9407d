use crate::domain::entities::price_row::PriceRow;
use crate::domain::error::DomainError;
use crate::domain::ports::price_repository::PriceRepository;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqlitePriceRepo {
    conn: Mutex<Connection>,
}

impl SqlitePriceRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_price(row: &rusqlite::Row) -> Result<PriceRow, rusqlite::Error> {
        let date_str: String = row.get(1)?;
        let date: NaiveDate = date_str.parse().map_err(|_| {
            rusqlite::Error::InvalidColumnType(1, "date".into(), rusqlite::types::Type::Text)
        })?;
        Ok(PriceRow {
            asset_id: row.get(0)?,
            date,
            open: row.get(2)?,
            high: row.get(3)?,
            low: row.get(4)?,
            close: row.get(5)?,
            volume: row.get(6)?,
        })
    }
}

impl PriceRepository for SqlitePriceRepo {
    fn upsert_row(&self, row: &PriceRow) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO price_history (asset_id, date, open, high, low, close, volume)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(asset_id, date) DO UPDATE SET
                 open = excluded.open,
                 high = excluded.high,
                 low = excluded.low,
                 close = excluded.close,
                 volume = excluded.volume",
            params![
                row.asset_id,
                row.date.to_string(),
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Upsert failed: {e}")))?;
        Ok(())
    }

    fn rows_for_asset(&self, asset_id: &str, limit: Option<usize>) -> Result<Vec<PriceRow>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = String::from(
            "SELECT asset_id, date, open, high, low, close, volume
             FROM price_history WHERE asset_id = ?1 ORDER BY date DESC",
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![asset_id], Self::row_to_price)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
