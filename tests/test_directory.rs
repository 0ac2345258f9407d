use assetjet::application::sync::AssetSelector;
use assetjet::domain::error::DomainError;
use assetjet::domain::ports::indicator_engine::IndicatorEngine;
use assetjet::domain::ports::price_provider::{
    ClosePoint, OhlcPoint, PriceProvider, ProviderError, SnapshotQuote,
};
use assetjet::domain::values::provider_map::ProviderIdMap;
use assetjet::domain::values::recompute_window::RecomputeWindow;
use assetjet::AssetJet;
use async_trait::async_trait;
use std::sync::Arc;

/// Provider stub for tests that never reach the network.
struct StubProvider;

#[async_trait]
impl PriceProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn snapshot(&self, provider_ids: &[String]) -> Result<Vec<SnapshotQuote>, ProviderError> {
        Ok(provider_ids
            .iter()
            .map(|id| SnapshotQuote {
                provider_id: id.clone(),
                price: 1.0,
            })
            .collect())
    }

    async fn close_series(&self, _provider_id: &str, _days: u32) -> Result<Vec<ClosePoint>, ProviderError> {
        Ok(vec![])
    }

    async fn ohlc_series(&self, _provider_id: &str, _days: u32) -> Result<Vec<OhlcPoint>, ProviderError> {
        Ok(vec![])
    }
}

struct NoopEngine;

impl IndicatorEngine for NoopEngine {
    fn recompute(&self, _window: &RecomputeWindow) -> Result<(), DomainError> {
        Ok(())
    }
}

fn setup() -> AssetJet {
    AssetJet::with_components(
        ":memory:",
        Arc::new(StubProvider),
        Arc::new(NoopEngine),
        ProviderIdMap::default(),
    )
    .unwrap()
}

#[test]
fn test_add_asset_uppercases_and_lists() {
    let aj = setup();
    let asset = aj.add_asset("btc").unwrap();
    assert_eq!(asset.symbol, "BTC");

    let assets = aj.assets().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].symbol, "BTC");
    assert_eq!(assets[0].provider_id.as_deref(), Some("bitcoin"));
}

#[test]
fn test_add_duplicate_symbol_is_rejected() {
    let aj = setup();
    aj.add_asset("BTC").unwrap();
    let err = aj.add_asset("btc").unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_add_empty_symbol_is_rejected() {
    let aj = setup();
    assert!(matches!(
        aj.add_asset("  "),
        Err(DomainError::InvalidInput(_))
    ));
}

#[test]
fn test_unmapped_asset_listed_without_provider_id() {
    let aj = setup();
    aj.add_asset("PEPE").unwrap();
    let assets = aj.assets().unwrap();
    assert_eq!(assets[0].provider_id, None);
}

#[test]
fn test_history_for_unknown_symbol_is_not_found() {
    let aj = setup();
    assert!(matches!(
        aj.history("BTC", None),
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_selector_id_takes_precedence_over_symbol() {
    let aj = setup();
    let btc = aj.add_asset("BTC").unwrap();
    let eth = aj.add_asset("ETH").unwrap();

    // Both supplied and disagreeing: the id wins, the symbol is ignored.
    let sel = AssetSelector {
        asset_id: Some(eth.id.clone()),
        symbol: Some("BTC".into()),
    };
    let result = aj.snapshot(Some(&sel)).await.unwrap();
    assert_eq!(result.assets.len(), 1);
    assert_eq!(result.assets[0].symbol, "ETH");

    // Unknown id falls back to the symbol.
    let sel = AssetSelector {
        asset_id: Some("no-such-id".into()),
        symbol: Some(btc.symbol.clone()),
    };
    let result = aj.snapshot(Some(&sel)).await.unwrap();
    assert_eq!(result.assets[0].symbol, "BTC");
}

#[tokio::test]
async fn test_empty_directory_is_an_input_error() {
    let aj = setup();
    let err = aj.snapshot(None).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[tokio::test]
async fn test_directory_with_no_mapped_assets_is_an_input_error() {
    let aj = setup();
    aj.add_asset("PEPE").unwrap();
    let err = aj.backfill_ohlc(None, 14).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}
