use serde::Serialize;

/// KPI totals and averages over a filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub total_spend: f64,
    pub total_clicks: u64,
    pub total_impressions: u64,
    /// Mean of the per-row `cpc` column. `None` when there are no rows.
    pub avg_cpc: Option<f64>,
    /// Mean of the per-row `ctr` column, in percentage points. `None` when there are no rows.
    pub avg_ctr: Option<f64>,
    pub record_count: usize,
}

impl MetricsSummary {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
