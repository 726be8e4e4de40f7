pub mod format;

use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::filter::{self, FilterCriteria, FilterOptions};
use crate::insights::{generate_insights_with, Insight, InsightThresholds, Severity};
use crate::metrics::{self, MetricsSummary};
use crate::model::{AdRecord, Dataset};
use crate::timeseries::{self, SpendOverTime};

use format::{format_avg_currency, format_avg_percent, format_count, format_currency};

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub options: FilterOptions,
    pub criteria: FilterCriteria,
    pub summary: MetricsSummary,
    pub spend_over_time: SpendOverTime,
    #[serde(serialize_with = "serialize_insights")]
    pub insights: Vec<Insight>,
    /// Filtered records, highest spend first.
    pub table: Vec<AdRecord>,
    /// When the underlying sheet was read.
    pub fetched_at: DateTime<Utc>,
}

impl DashboardReport {
    /// Run the full pipeline: filter, then summarize, chart, and advise.
    pub fn build(
        dataset: &Dataset,
        criteria: &FilterCriteria,
        thresholds: &InsightThresholds,
    ) -> Self {
        let records = &dataset.records;
        let filtered = filter::filter(records, criteria);
        let summary = metrics::aggregate(&filtered);
        let spend_over_time = timeseries::daily_spend(&filtered);
        let insights = generate_insights_with(&summary, thresholds);

        Self {
            options: FilterOptions::from_records(records),
            criteria: criteria.clone(),
            summary,
            spend_over_time,
            insights,
            table: sorted_by_spend(filtered),
            fetched_at: dataset.fetched_at,
        }
    }

    /// The five labelled KPI displays, formatted.
    pub fn kpis(&self) -> Vec<(&'static str, String)> {
        kpis(&self.summary)
    }
}

/// Labelled, formatted KPI values in display order.
pub fn kpis(summary: &MetricsSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Total Spend", format_currency(summary.total_spend)),
        ("Total Clicks", format_count(summary.total_clicks)),
        ("Impressions", format_count(summary.total_impressions)),
        ("Avg. CPC", format_avg_currency(summary.avg_cpc)),
        ("Avg. CTR", format_avg_percent(summary.avg_ctr)),
    ]
}

/// Sort descending by spend. Ties keep their input order.
pub fn sorted_by_spend(mut records: Vec<AdRecord>) -> Vec<AdRecord> {
    records.sort_by(|a, b| b.spend.total_cmp(&a.spend));
    records
}

/// JSON view of an [`Insight`]: rule, severity, and display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightEntry {
    pub kind: Insight,
    pub severity: Severity,
    pub message: &'static str,
}

impl From<Insight> for InsightEntry {
    fn from(insight: Insight) -> Self {
        Self {
            kind: insight,
            severity: insight.severity(),
            message: insight.message(),
        }
    }
}

fn serialize_insights<S: Serializer>(insights: &[Insight], s: S) -> Result<S::Ok, S::Error> {
    let mut seq = s.serialize_seq(Some(insights.len()))?;
    for i in insights {
        seq.serialize_element(&InsightEntry::from(*i))?;
    }
    seq.end()
}
