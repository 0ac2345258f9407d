use async_trait::async_trait;

/// Current price for one provider id, no date attached; the caller stamps it
/// with today's UTC day.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotQuote {
    pub provider_id: String,
    pub price: f64,
}

/// One point of a close-only series, provider-chronological order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    pub timestamp_ms: i64,
    pub close: f64,
}

/// One day-bucketed OHLC candle from the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcPoint {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug)]
pub enum ProviderError {
    /// Non-2xx status, transport failure, or timeout.
    Unavailable(String),
    /// Response body did not match the expected shape.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable(msg) => write!(f, "Provider unavailable: {msg}"),
            ProviderError::Parse(msg) => write!(f, "Provider parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// External market-data API in its three supported response shapes. Each call
/// performs exactly one request; no retries, failures surface to the caller.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Current price per requested id. Ids the provider has no quote for are
    /// simply absent from the result.
    async fn snapshot(&self, provider_ids: &[String]) -> Result<Vec<SnapshotQuote>, ProviderError>;

    /// Up to `days` of (timestamp, close) pairs for one id.
    async fn close_series(&self, provider_id: &str, days: u32) -> Result<Vec<ClosePoint>, ProviderError>;

    /// Recent daily OHLC candles for one id (the provider returns roughly
    /// days + 1 entries).
    async fn ohlc_series(&self, provider_id: &str, days: u32) -> Result<Vec<OhlcPoint>, ProviderError>;
}
