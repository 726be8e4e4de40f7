//! Rule-based advisory messages over a [`MetricsSummary`].
//!
//! Rules are evaluated in a fixed order and are not exclusive: CTR band,
//! CPC band, zero clicks, low spend. When nothing fires the result is a
//! single [`Insight::Stable`].

use serde::Serialize;

use crate::metrics::MetricsSummary;

/// Rule thresholds. `Default` holds the stock values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightThresholds {
    /// `avg_ctr` below this (percentage points) is low.
    pub ctr_low: f64,
    /// `avg_ctr` above this is strong.
    pub ctr_high: f64,
    /// `avg_cpc` above this is expensive.
    pub cpc_high: f64,
    /// `avg_cpc` below this is cheap.
    pub cpc_low: f64,
    /// `total_spend` below this is too little data to judge.
    pub min_spend: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            ctr_low: 1.0,
            ctr_high: 3.0,
            cpc_high: 1.0,
            cpc_low: 0.50,
            min_spend: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Positive,
    Alert,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    LowCtr,
    StrongCtr,
    HighCpc,
    LowCpc,
    NoClicks,
    LowSpend,
    Stable,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Insight::LowCtr => {
                "CTR is quite low - consider improving creatives or tightening targeting."
            }
            Insight::StrongCtr => "CTR is strong! Ads are engaging well with your audience.",
            Insight::HighCpc => "CPC is high - test more budget-friendly audiences or creatives.",
            Insight::LowCpc => "CPC is low - campaigns are cost-efficient!",
            Insight::NoClicks => "No clicks recorded - are campaigns running?",
            Insight::LowSpend => {
                "Low spend detected - there may not be enough data for strong conclusions."
            }
            Insight::Stable => "Performance looks stable based on current data.",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Insight::LowCtr | Insight::HighCpc => Severity::Warning,
            Insight::StrongCtr | Insight::LowCpc => Severity::Positive,
            Insight::NoClicks => Severity::Alert,
            Insight::LowSpend => Severity::Info,
            Insight::Stable => Severity::Success,
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Evaluate the rules with the stock thresholds.
pub fn generate_insights(summary: &MetricsSummary) -> Vec<Insight> {
    generate_insights_with(summary, &InsightThresholds::default())
}

/// Evaluate the rules in order. Never returns an empty list.
///
/// An absent average (empty selection) fires neither of its band rules.
pub fn generate_insights_with(
    summary: &MetricsSummary,
    thresholds: &InsightThresholds,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(ctr) = summary.avg_ctr {
        if ctr < thresholds.ctr_low {
            insights.push(Insight::LowCtr);
        } else if ctr > thresholds.ctr_high {
            insights.push(Insight::StrongCtr);
        }
    }

    if let Some(cpc) = summary.avg_cpc {
        if cpc > thresholds.cpc_high {
            insights.push(Insight::HighCpc);
        } else if cpc < thresholds.cpc_low {
            insights.push(Insight::LowCpc);
        }
    }

    if summary.total_clicks == 0 {
        insights.push(Insight::NoClicks);
    }

    if summary.total_spend < thresholds.min_spend {
        insights.push(Insight::LowSpend);
    }

    if insights.is_empty() {
        insights.push(Insight::Stable);
    }
    insights
}
