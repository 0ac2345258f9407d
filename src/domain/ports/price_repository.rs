use crate::domain::entities::price_row::PriceRow;
use crate::domain::error::DomainError;

pub trait PriceRepository: Send + Sync {
    /// Insert-or-replace keyed by (asset_id, date). A pre-existing row for the
    /// same day is fully overwritten, so re-running the same input is a no-op.
    fn upsert_row(&self, row: &PriceRow) -> Result<(), DomainError>;

    /// Stored rows for one asset, ordered by date descending.
    fn rows_for_asset(&self, asset_id: &str, limit: Option<usize>) -> Result<Vec<PriceRow>, DomainError>;
}
