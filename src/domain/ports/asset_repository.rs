use crate::domain::entities::asset::Asset;
use crate::domain::error::DomainError;

/// Read surface for the externally maintained asset table, plus the seeding
/// write used by the `asset-add` command and tests. The pipeline itself only
/// calls `list_assets` (one directory read per run; filtering happens
/// in-process).
pub trait AssetRepository: Send + Sync {
    fn list_assets(&self) -> Result<Vec<Asset>, DomainError>;
    fn add_asset(&self, asset: &Asset) -> Result<(), DomainError>;
}
