pub mod config;
pub mod date_util;
pub mod error;
pub mod filter;
pub mod insights;
pub mod metrics;
pub mod model;
pub mod report;
pub mod sheet_url;
pub mod source;
pub mod timeseries;

pub use config::Settings;
pub use error::{Error, Result};
pub use filter::{filter, FilterCriteria, FilterOptions};
pub use insights::{generate_insights, generate_insights_with, Insight, InsightThresholds, Severity};
pub use metrics::{aggregate, MetricsSummary};
pub use model::{AdRecord, Dataset};
pub use report::DashboardReport;
pub use sheet_url::{parse_sheets_url, resolve_spreadsheet_id};
pub use source::SheetsClient;
pub use timeseries::{daily_spend, DailySpend, SpendOverTime};

/// Main entry point for the ads dashboard.
///
/// Holds one fetched dataset. Every report is recomputed from it, so a
/// fresh view of the sheet means constructing a new `AdsDashboard`.
pub struct AdsDashboard {
    dataset: Dataset,
    thresholds: InsightThresholds,
}

impl AdsDashboard {
    /// Fetch the worksheet described by `settings`.
    pub async fn load(settings: &Settings) -> Result<Self> {
        let client = SheetsClient::from_settings(settings)?;
        let dashboard = Self::from_records(client.fetch_records().await?);
        log::info!(
            "Loaded {} records from spreadsheet {}",
            dashboard.dataset.len(),
            client.spreadsheet_id()
        );
        Ok(dashboard)
    }

    /// Build from records already in memory.
    pub fn from_records(records: Vec<AdRecord>) -> Self {
        Self {
            dataset: Dataset::new(records),
            thresholds: InsightThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Campaigns and date span to offer as filter controls.
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.dataset.records)
    }

    /// All campaigns over the full date span.
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::defaults(&self.options())
    }

    pub fn report(&self, criteria: &FilterCriteria) -> DashboardReport {
        DashboardReport::build(&self.dataset, criteria, &self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(name: &str, start: NaiveDate, spend: f64, clicks: u64, cpc: f64, ctr: f64) -> AdRecord {
        AdRecord {
            campaign_name: name.to_string(),
            date_start: start,
            date_stop: start,
            spend,
            clicks,
            impressions: 1000,
            cpc,
            ctr,
        }
    }

    fn dashboard() -> AdsDashboard {
        AdsDashboard::from_records(vec![
            rec("Spring Sale", d(2025, 3, 1), 25.0, 40, 0.62, 4.0),
            rec("Spring Sale", d(2025, 3, 2), 30.0, 50, 0.60, 5.0),
            rec("Retargeting", d(2025, 3, 2), 5.0, 2, 2.50, 0.2),
        ])
    }

    #[test]
    fn test_default_report_covers_everything() {
        let dash = dashboard();
        let report = dash.report(&dash.default_criteria());
        assert_eq!(dash.dataset().len(), 3);
        assert_eq!(report.fetched_at, dash.dataset().fetched_at);
        assert_eq!(report.summary.record_count, 3);
        assert_eq!(report.summary.total_spend, 60.0);
        assert_eq!(report.table.len(), 3);
        assert_eq!(report.spend_over_time.points().len(), 2);
    }

    #[test]
    fn test_narrowed_report() {
        let dash = dashboard();
        let criteria = dash.default_criteria().campaigns(["Retargeting"]);
        let report = dash.report(&criteria);
        assert_eq!(report.summary.total_clicks, 2);
        assert_eq!(report.spend_over_time, SpendOverTime::NotEnoughVariation);
        assert_eq!(
            report.insights,
            vec![Insight::LowCtr, Insight::HighCpc, Insight::LowSpend]
        );
    }

    #[test]
    fn test_custom_thresholds_flow_into_report() {
        let dash = dashboard().with_thresholds(InsightThresholds {
            ctr_high: 10.0,
            ..InsightThresholds::default()
        });
        let criteria = dash.default_criteria().campaigns(["Spring Sale"]);
        assert_eq!(dash.report(&criteria).insights, vec![Insight::Stable]);
    }

    #[test]
    fn test_empty_dataset() {
        let dash = AdsDashboard::from_records(Vec::new());
        assert!(dash.dataset().is_empty());
        let report = dash.report(&dash.default_criteria());
        assert!(report.table.is_empty());
        assert_eq!(report.summary.avg_ctr, None);
        assert_eq!(report.insights, vec![Insight::NoClicks, Insight::LowSpend]);
    }

    #[test]
    fn test_options() {
        let opts = dashboard().options();
        assert_eq!(opts.campaigns, vec!["Spring Sale", "Retargeting"]);
        assert_eq!(opts.date_min, Some(d(2025, 3, 1)));
        assert_eq!(opts.date_max, Some(d(2025, 3, 2)));
    }
}
