use crate::domain::entities::price_row::PriceRow;
use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive date range over which indicators must be regenerated after new
/// price rows land. `asset_id: None` means all assets; `start`/`end: None`
/// mean the full stored range. Built per run from the rows actually written,
/// never wider than the written set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecomputeWindow {
    pub asset_id: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RecomputeWindow {
    /// Full recompute across every asset and date.
    pub fn global() -> Self {
        Self {
            asset_id: None,
            start: None,
            end: None,
        }
    }

    /// Minimal window covering every written row for one asset. Returns None
    /// when no rows were written (nothing to recompute).
    pub fn covering(asset_id: &str, written: &[PriceRow]) -> Option<Self> {
        let start = written.iter().map(|r| r.date).min()?;
        let end = written.iter().map(|r| r.date).max()?;
        Some(Self {
            asset_id: Some(asset_id.to_string()),
            start: Some(start),
            end: Some(end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str) -> PriceRow {
        PriceRow::from_close("a1", date.parse().unwrap(), 1.0)
    }

    #[test]
    fn test_covering_uses_min_and_max_dates() {
        let rows = vec![row("2024-03-05"), row("2024-03-01"), row("2024-03-03")];
        let w = RecomputeWindow::covering("a1", &rows).unwrap();
        assert_eq!(w.asset_id.as_deref(), Some("a1"));
        assert_eq!(w.start, Some("2024-03-01".parse().unwrap()));
        assert_eq!(w.end, Some("2024-03-05".parse().unwrap()));
    }

    #[test]
    fn test_covering_empty_is_none() {
        assert!(RecomputeWindow::covering("a1", &[]).is_none());
    }

    #[test]
    fn test_global_is_all_null() {
        let w = RecomputeWindow::global();
        assert!(w.asset_id.is_none() && w.start.is_none() && w.end.is_none());
    }
}
