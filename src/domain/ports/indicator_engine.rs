use crate::domain::error::DomainError;
use crate::domain::values::recompute_window::RecomputeWindow;

/// Downstream recompute procedure for derived indicators. The formulas are
/// owned by the implementation; the pipeline only scopes the window and
/// treats failure as non-fatal (prices stay written, indicators go stale
/// until a retry succeeds).
pub trait IndicatorEngine: Send + Sync {
    fn recompute(&self, window: &RecomputeWindow) -> Result<(), DomainError>;
}
