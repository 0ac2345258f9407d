use crate::application::directory::AssetDirectory;
use crate::application::normalize;
use crate::domain::entities::asset::Asset;
use crate::domain::entities::price_row::PriceRow;
use crate::domain::error::DomainError;
use crate::domain::ports::asset_repository::AssetRepository;
use crate::domain::ports::indicator_engine::IndicatorEngine;
use crate::domain::ports::price_provider::PriceProvider;
use crate::domain::ports::price_repository::PriceRepository;
use crate::domain::values::provider_map::ProviderIdMap;
use crate::domain::values::recompute_window::RecomputeWindow;
use serde::Serialize;
use std::sync::Arc;

/// Optional identifying parameters for single-asset modes. When both are
/// supplied the id is tried first and the symbol is only a fallback.
#[derive(Debug, Clone, Default)]
pub struct AssetSelector {
    pub asset_id: Option<String>,
    pub symbol: Option<String>,
}

impl AssetSelector {
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none() && self.symbol.is_none()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// All price writes behaved as expected and indicators were recomputed
    /// (or there was nothing to recompute).
    Ok,
    /// Price rows landed but the indicator recompute failed; derived
    /// indicators are stale until a retry succeeds.
    Partial,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "status", content = "detail")]
pub enum IndicatorOutcome {
    Ok,
    Failed(String),
    Skipped,
}

/// Per-asset outcome: a written-row count, or the reason the asset was
/// skipped. A failed asset never blocks its siblings.
#[derive(Debug, Serialize)]
pub struct AssetOutcome {
    pub symbol: String,
    pub rows_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssetOutcome {
    fn written(symbol: &str, count: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            rows_written: count,
            error: None,
        }
    }

    fn failed(symbol: &str, reason: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            rows_written: 0,
            error: Some(reason),
        }
    }
}

/// Output payload of one pipeline run.
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub status: BatchStatus,
    pub assets: Vec<AssetOutcome>,
    pub indicators: IndicatorOutcome,
}

impl BatchResult {
    fn new(assets: Vec<AssetOutcome>, indicators: IndicatorOutcome) -> Self {
        let status = match indicators {
            IndicatorOutcome::Failed(_) => BatchStatus::Partial,
            _ => BatchStatus::Ok,
        };
        Self {
            status,
            assets,
            indicators,
        }
    }

    pub fn total_rows_written(&self) -> usize {
        self.assets.iter().map(|a| a.rows_written).sum()
    }
}

/// Job orchestrator: resolves the target asset set for the requested fetch
/// mode, runs directory → provider → normalizer → upsert per asset, then
/// triggers one indicator recompute over the window the run actually touched.
/// This is the only layer that decides whether a failure is batch-fatal
/// (input/directory) or isolable (per-asset provider/write).
pub struct SyncUseCase {
    asset_repo: Arc<dyn AssetRepository>,
    price_repo: Arc<dyn PriceRepository>,
    provider: Arc<dyn PriceProvider>,
    indicators: Arc<dyn IndicatorEngine>,
    mapping: ProviderIdMap,
}

impl SyncUseCase {
    pub fn new(
        asset_repo: Arc<dyn AssetRepository>,
        price_repo: Arc<dyn PriceRepository>,
        provider: Arc<dyn PriceProvider>,
        indicators: Arc<dyn IndicatorEngine>,
        mapping: ProviderIdMap,
    ) -> Self {
        Self {
            asset_repo,
            price_repo,
            provider,
            indicators,
            mapping,
        }
    }

    /// Snapshot mode: stamp the provider's current price onto today's UTC
    /// day, for one asset or for every mapped asset. One provider call covers
    /// the whole run, so a provider failure here is terminal.
    pub async fn snapshot(&self, selector: Option<&AssetSelector>) -> Result<BatchResult, DomainError> {
        let directory = AssetDirectory::load(&self.asset_repo)?;
        let targets = self.resolve_targets(&directory, selector)?;

        let ids: Vec<String> = targets
            .iter()
            .filter_map(|a| self.mapping.provider_id(&a.symbol).map(String::from))
            .collect();

        let quotes = self
            .provider
            .snapshot(&ids)
            .await
            .map_err(|e| DomainError::Provider(e.to_string()))?;

        let today = chrono::Utc::now().date_naive();
        let mut outcomes = Vec::new();
        let mut written: Vec<PriceRow> = Vec::new();

        for asset in &targets {
            let provider_id = match self.provider_id(asset) {
                Ok(id) => id,
                Err(e) => {
                    outcomes.push(AssetOutcome::failed(&asset.symbol, e.to_string()));
                    continue;
                }
            };
            let Some(quote) = quotes.iter().find(|q| q.provider_id == provider_id) else {
                eprintln!(
                    "Warning: skipping {}: no price returned by {}",
                    asset.symbol,
                    self.provider.name()
                );
                outcomes.push(AssetOutcome::failed(
                    &asset.symbol,
                    "No price returned by provider".into(),
                ));
                continue;
            };

            let row = normalize::normalize_snapshot(&asset.id, today, quote.price);
            let rows = self.write_rows(&asset.symbol, vec![row]);
            outcomes.push(AssetOutcome::written(&asset.symbol, rows.len()));
            written.extend(rows);
        }

        let window = self.window_for(selector, &targets, &written);
        let indicators = self.trigger_indicators(window);
        Ok(BatchResult::new(outcomes, indicators))
    }

    /// N-day close backfill for exactly one asset. The selector is required;
    /// mapping and provider failures are terminal for the whole call.
    pub async fn backfill(&self, selector: &AssetSelector, days: u32) -> Result<BatchResult, DomainError> {
        if selector.is_empty() {
            return Err(DomainError::InvalidInput(
                "Provide a symbol or an asset id".into(),
            ));
        }
        validate_days(days)?;

        let directory = AssetDirectory::load(&self.asset_repo)?;
        let asset = directory.resolve(selector.asset_id.as_deref(), selector.symbol.as_deref())?;
        let provider_id = self.provider_id(asset)?;

        let points = self
            .provider
            .close_series(provider_id, days)
            .await
            .map_err(|e| DomainError::Provider(e.to_string()))?;

        let rows = normalize::normalize_close_series(&asset.id, &points);
        let written = self.write_rows(&asset.symbol, rows);

        let window = RecomputeWindow::covering(&asset.id, &written);
        let indicators = self.trigger_indicators(window);
        Ok(BatchResult::new(
            vec![AssetOutcome::written(&asset.symbol, written.len())],
            indicators,
        ))
    }

    /// Fixed-window OHLC backfill, for one asset or for every mapped asset.
    /// In batch mode a per-asset provider failure is recorded and the loop
    /// moves on; the indicator trigger still runs once after the loop.
    pub async fn backfill_ohlc(
        &self,
        selector: Option<&AssetSelector>,
        days: u32,
    ) -> Result<BatchResult, DomainError> {
        validate_days(days)?;

        let directory = AssetDirectory::load(&self.asset_repo)?;
        let targets = self.resolve_targets(&directory, selector)?;
        let single_asset = selector.is_some();

        let mut outcomes = Vec::new();
        let mut written: Vec<PriceRow> = Vec::new();

        for asset in &targets {
            // Single-asset mode already validated the mapping in
            // resolve_targets, so a gap here only occurs in batch mode.
            let provider_id = match self.provider_id(asset) {
                Ok(id) => id,
                Err(e) => {
                    eprintln!("Warning: skipping {}: {e}", asset.symbol);
                    outcomes.push(AssetOutcome::failed(&asset.symbol, e.to_string()));
                    continue;
                }
            };
            let points = match self.provider.ohlc_series(provider_id, days).await {
                Ok(points) => points,
                Err(e) if single_asset => return Err(DomainError::Provider(e.to_string())),
                Err(e) => {
                    eprintln!("Warning: {} fetch failed: {e}", asset.symbol);
                    outcomes.push(AssetOutcome::failed(&asset.symbol, e.to_string()));
                    continue;
                }
            };

            let rows = normalize::normalize_ohlc_series(&asset.id, &points);
            let asset_rows = self.write_rows(&asset.symbol, rows);
            outcomes.push(AssetOutcome::written(&asset.symbol, asset_rows.len()));
            written.extend(asset_rows);
        }

        let window = self.window_for(selector, &targets, &written);
        let indicators = self.trigger_indicators(window);
        Ok(BatchResult::new(outcomes, indicators))
    }

    /// Target set for the run: one resolved asset when a selector is given
    /// (a mapping gap is terminal there), otherwise the full directory. In
    /// batch mode unmapped assets stay in the set so the result can report
    /// them as failures; a directory with no mapped asset at all is an input
    /// error, not an empty success.
    fn resolve_targets(
        &self,
        directory: &AssetDirectory,
        selector: Option<&AssetSelector>,
    ) -> Result<Vec<Asset>, DomainError> {
        if directory.is_empty() {
            return Err(DomainError::InvalidInput("No assets found".into()));
        }

        match selector {
            Some(sel) => {
                let asset =
                    directory.resolve(sel.asset_id.as_deref(), sel.symbol.as_deref())?;
                self.provider_id(asset)?;
                Ok(vec![asset.clone()])
            }
            None => {
                if directory.mapped(&self.mapping).is_empty() {
                    return Err(DomainError::InvalidInput(
                        "No supported symbols mapped to provider ids".into(),
                    ));
                }
                Ok(directory.all().to_vec())
            }
        }
    }

    fn provider_id(&self, asset: &Asset) -> Result<&str, DomainError> {
        self.mapping
            .provider_id(&asset.symbol)
            .ok_or_else(|| DomainError::MappingMissing(asset.symbol.clone()))
    }

    /// Upsert each row, keeping the ones that landed. A row-level write
    /// failure is logged and excluded from the count; it never aborts
    /// sibling rows.
    fn write_rows(&self, symbol: &str, rows: Vec<PriceRow>) -> Vec<PriceRow> {
        let mut written = Vec::with_capacity(rows.len());
        for row in rows {
            match self.price_repo.upsert_row(&row) {
                Ok(()) => written.push(row),
                Err(e) => {
                    eprintln!("Warning: upsert failed for {symbol} {}: {e}", row.date);
                }
            }
        }
        written
    }

    /// Minimal window covering the run's writes: single-asset runs get that
    /// asset's min/max dates, multi-asset runs get a global recompute. No
    /// rows written means no window.
    fn window_for(
        &self,
        selector: Option<&AssetSelector>,
        targets: &[Asset],
        written: &[PriceRow],
    ) -> Option<RecomputeWindow> {
        if written.is_empty() {
            return None;
        }
        if selector.is_some() {
            let asset = targets.first()?;
            RecomputeWindow::covering(&asset.id, written)
        } else {
            Some(RecomputeWindow::global())
        }
    }

    /// Exactly one recompute per run, after all writes. Failure downgrades
    /// the run to partial success instead of failing it.
    fn trigger_indicators(&self, window: Option<RecomputeWindow>) -> IndicatorOutcome {
        let Some(window) = window else {
            return IndicatorOutcome::Skipped;
        };
        match self.indicators.recompute(&window) {
            Ok(()) => IndicatorOutcome::Ok,
            Err(e) => {
                eprintln!("Warning: indicator recompute failed: {e}");
                IndicatorOutcome::Failed(e.to_string())
            }
        }
    }
}

fn validate_days(days: u32) -> Result<(), DomainError> {
    if days == 0 {
        return Err(DomainError::InvalidInput("days must be at least 1".into()));
    }
    Ok(())
}
