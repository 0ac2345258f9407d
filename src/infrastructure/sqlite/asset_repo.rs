use crate::domain::entities::asset::Asset;
use crate::domain::error::DomainError;
use crate::domain::ports::asset_repository::AssetRepository;
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteAssetRepo {
    conn: Mutex<Connection>,
}

impl SqliteAssetRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl AssetRepository for SqliteAssetRepo {
    fn list_assets(&self) -> Result<Vec<Asset>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, symbol FROM assets ORDER BY symbol")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let assets = stmt
            .query_map([], |row| {
                Ok(Asset {
                    id: row.get(0)?,
                    symbol: row.get(1)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(assets)
    }

    fn add_asset(&self, asset: &Asset) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO assets (id, symbol) VALUES (?1, ?2)",
            params![asset.id, asset.symbol],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::InvalidInput(format!("Asset already exists: {}", asset.symbol))
            }
            e => DomainError::Database(format!("Failed to add asset: {e}")),
        })?;
        Ok(())
    }
}
