use serde::{Deserialize, Serialize};

/// A tradable instrument tracked by internal id and uppercase ticker symbol.
/// Assets are maintained outside the sync pipeline; the pipeline only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
}

impl Asset {
    pub fn new(symbol: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.trim().to_uppercase(),
        }
    }
}
