use crate::domain::ports::price_provider::{
    ClosePoint, OhlcPoint, PriceProvider, ProviderError, SnapshotQuote,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko public API client (no auth). Each method performs exactly one
/// request; retries and backoff are left to the caller's schedule. Calls are
/// capped at 10 seconds; a timeout surfaces as Unavailable like any other
/// transport failure.
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "CoinGecko returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct SimplePrice {
    #[serde(default)]
    usd: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct MarketChart {
    /// [[epoch_ms, price], ...] in provider-chronological order.
    #[serde(default)]
    prices: Vec<(i64, f64)>,
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn snapshot(&self, provider_ids: &[String]) -> Result<Vec<SnapshotQuote>, ProviderError> {
        if provider_ids.is_empty() {
            return Ok(vec![]);
        }

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            provider_ids.join(",")
        );
        let prices: HashMap<String, SimplePrice> = self.get_json(&url).await?;

        // Ids with no usd quote are dropped here; the orchestrator records
        // the gap per asset.
        Ok(prices
            .into_iter()
            .filter_map(|(provider_id, p)| {
                p.usd.filter(|v| v.is_finite()).map(|price| SnapshotQuote {
                    provider_id,
                    price,
                })
            })
            .collect())
    }

    async fn close_series(&self, provider_id: &str, days: u32) -> Result<Vec<ClosePoint>, ProviderError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, provider_id, days
        );
        let chart: MarketChart = self.get_json(&url).await?;

        Ok(chart
            .prices
            .into_iter()
            .map(|(timestamp_ms, close)| ClosePoint {
                timestamp_ms,
                close,
            })
            .collect())
    }

    async fn ohlc_series(&self, provider_id: &str, days: u32) -> Result<Vec<OhlcPoint>, ProviderError> {
        let url = format!(
            "{}/coins/{}/ohlc?vs_currency=usd&days={}",
            self.base_url, provider_id, days
        );
        let candles: Vec<(i64, f64, f64, f64, f64)> = self.get_json(&url).await?;

        Ok(candles
            .into_iter()
            .map(|(timestamp_ms, open, high, low, close)| OhlcPoint {
                timestamp_ms,
                open,
                high,
                low,
                close,
            })
            .collect())
    }
}
