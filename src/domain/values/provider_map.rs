use std::collections::HashMap;

/// Immutable symbol → provider-id configuration, fixed for the lifetime of
/// the pipeline. An absent entry is a configuration gap (the asset exists but
/// cannot be fetched), distinct from an unknown asset.
#[derive(Debug, Clone)]
pub struct ProviderIdMap {
    entries: HashMap<String, String>,
}

impl ProviderIdMap {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(sym, id)| (sym.to_uppercase(), id.to_string()))
                .collect(),
        }
    }

    pub fn provider_id(&self, symbol: &str) -> Option<&str> {
        self.entries.get(&symbol.to_uppercase()).map(|s| s.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&symbol.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProviderIdMap {
    /// The coins the dashboard supports out of the box.
    fn default() -> Self {
        Self::from_pairs(&[
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("SOL", "solana"),
            ("XRP", "ripple"),
            ("DOGE", "dogecoin"),
            ("SHIB", "shiba-inu"),
        ])
    }
}
