use crate::domain::entities::asset::Asset;
use crate::domain::error::DomainError;
use crate::domain::ports::asset_repository::AssetRepository;
use crate::domain::values::provider_map::ProviderIdMap;
use std::sync::Arc;

/// In-process view of the asset table, loaded with a single read per run.
/// All lookups after `load` are pure; nothing is pushed down to the store.
pub struct AssetDirectory {
    assets: Vec<Asset>,
}

impl AssetDirectory {
    pub fn load(repo: &Arc<dyn AssetRepository>) -> Result<Self, DomainError> {
        Ok(Self {
            assets: repo.list_assets()?,
        })
    }

    #[cfg(test)]
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn all(&self) -> &[Asset] {
        &self.assets
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Asset> {
        let symbol = symbol.to_uppercase();
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    /// Resolve one asset from the optional identifying parameters. The id is
    /// tried first; the symbol is only consulted when the id is absent or did
    /// not match.
    pub fn resolve(
        &self,
        asset_id: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&Asset, DomainError> {
        if asset_id.is_none() && symbol.is_none() {
            return Err(DomainError::InvalidInput(
                "Provide a symbol or an asset id".into(),
            ));
        }

        let mut found = asset_id.and_then(|id| self.find_by_id(id));
        if found.is_none() {
            if let Some(sym) = symbol {
                found = self.find_by_symbol(sym);
            }
        }

        found.ok_or_else(|| {
            DomainError::NotFound(format!(
                "Asset not found: {}",
                symbol.or(asset_id).unwrap_or("?")
            ))
        })
    }

    /// Subset of the directory that has a provider mapping, in directory
    /// order. Assets without one are a configuration gap reported elsewhere.
    pub fn mapped(&self, map: &ProviderIdMap) -> Vec<&Asset> {
        self.assets
            .iter()
            .filter(|a| map.contains(&a.symbol))
            .collect()
    }
}
