pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::directory::AssetDirectory;
use crate::application::sync::{AssetSelector, BatchResult, SyncUseCase};
use crate::domain::entities::asset::Asset;
use crate::domain::entities::price_row::PriceRow;
use crate::domain::error::DomainError;
use crate::domain::ports::asset_repository::AssetRepository;
use crate::domain::ports::indicator_engine::IndicatorEngine;
use crate::domain::ports::price_provider::PriceProvider;
use crate::domain::ports::price_repository::PriceRepository;
use crate::domain::values::provider_map::ProviderIdMap;
use crate::infrastructure::provider::coingecko::CoinGeckoProvider;
use crate::infrastructure::sqlite::asset_repo::SqliteAssetRepo;
use crate::infrastructure::sqlite::indicator_engine::SqliteIndicatorEngine;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::price_repo::SqlitePriceRepo;
use rusqlite::Connection;
use serde::Serialize;
use std::sync::Arc;

/// Directory entry as reported by the `assets` command: the asset plus its
/// provider mapping, if configured.
#[derive(Debug, Serialize)]
pub struct AssetInfo {
    pub id: String,
    pub symbol: String,
    pub provider_id: Option<String>,
}

pub struct AssetJet {
    sync_uc: SyncUseCase,
    asset_repo: Arc<dyn AssetRepository>,
    price_repo: Arc<dyn PriceRepository>,
    mapping: ProviderIdMap,
}

impl AssetJet {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider: Arc<dyn PriceProvider> = Arc::new(CoinGeckoProvider::new());
        let indicator_conn = open_db(db_path)?;
        let indicators: Arc<dyn IndicatorEngine> =
            Arc::new(SqliteIndicatorEngine::new(indicator_conn));
        Self::with_components(db_path, provider, indicators, ProviderIdMap::default())
    }

    /// Wire the pipeline with explicit provider, indicator engine, and
    /// symbol mapping; this is how tests swap in fakes.
    pub fn with_components(
        db_path: &str,
        provider: Arc<dyn PriceProvider>,
        indicators: Arc<dyn IndicatorEngine>,
        mapping: ProviderIdMap,
    ) -> Result<Self, DomainError> {
        let asset_conn = open_db(db_path)?;
        let price_conn = open_db(db_path)?;

        let asset_repo: Arc<dyn AssetRepository> = Arc::new(SqliteAssetRepo::new(asset_conn));
        let price_repo: Arc<dyn PriceRepository> = Arc::new(SqlitePriceRepo::new(price_conn));

        Ok(Self {
            sync_uc: SyncUseCase::new(
                asset_repo.clone(),
                price_repo.clone(),
                provider,
                indicators,
                mapping.clone(),
            ),
            asset_repo,
            price_repo,
            mapping,
        })
    }

    // Delegating methods

    pub async fn snapshot(&self, selector: Option<&AssetSelector>) -> Result<BatchResult, DomainError> {
        self.sync_uc.snapshot(selector).await
    }

    pub async fn backfill(&self, selector: &AssetSelector, days: u32) -> Result<BatchResult, DomainError> {
        self.sync_uc.backfill(selector, days).await
    }

    pub async fn backfill_ohlc(
        &self,
        selector: Option<&AssetSelector>,
        days: u32,
    ) -> Result<BatchResult, DomainError> {
        self.sync_uc.backfill_ohlc(selector, days).await
    }

    pub fn assets(&self) -> Result<Vec<AssetInfo>, DomainError> {
        let assets = self.asset_repo.list_assets()?;
        Ok(assets
            .into_iter()
            .map(|a| AssetInfo {
                provider_id: self.mapping.provider_id(&a.symbol).map(String::from),
                id: a.id,
                symbol: a.symbol,
            })
            .collect())
    }

    pub fn add_asset(&self, symbol: &str) -> Result<Asset, DomainError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DomainError::InvalidInput("Symbol must not be empty".into()));
        }
        let asset = Asset::new(symbol);
        self.asset_repo.add_asset(&asset)?;
        Ok(asset)
    }

    pub fn history(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<PriceRow>, DomainError> {
        let directory = AssetDirectory::load(&self.asset_repo)?;
        let asset = directory.resolve(None, Some(symbol))?;
        self.price_repo.rows_for_asset(&asset.id, limit)
    }
}

fn open_db(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    run_migrations(&conn)?;
    Ok(conn)
}
