use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::AdRecord;

/// Choices offered to the user: every campaign and the overall date span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Distinct campaign names in order of first appearance.
    pub campaigns: Vec<String>,
    /// Earliest `date_start` in the dataset.
    pub date_min: Option<NaiveDate>,
    /// Latest `date_stop` in the dataset.
    pub date_max: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_records(records: &[AdRecord]) -> Self {
        let mut seen = HashSet::new();
        let campaigns = records
            .iter()
            .filter(|r| seen.insert(r.campaign_name.as_str()))
            .map(|r| r.campaign_name.clone())
            .collect();

        Self {
            campaigns,
            date_min: records.iter().map(|r| r.date_start).min(),
            date_max: records.iter().map(|r| r.date_stop).max(),
        }
    }
}

/// A user selection: which campaigns, and an inclusive date window.
///
/// A record passes when its campaign is selected and its whole
/// `[date_start, date_stop]` span lies inside `[date_from, date_to]`.
/// Records that only partially overlap the window are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub campaign_names: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl FilterCriteria {
    pub fn new<I, S>(campaigns: I, date_from: NaiveDate, date_to: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            campaign_names: campaigns.into_iter().map(Into::into).collect(),
            date_from,
            date_to,
        }
    }

    /// The selection before the user touches anything: all campaigns, the
    /// full date span. An empty dataset selects nothing.
    pub fn defaults(options: &FilterOptions) -> Self {
        Self::new(
            options.campaigns.iter().cloned(),
            options.date_min.unwrap_or(NaiveDate::MIN),
            options.date_max.unwrap_or(NaiveDate::MAX),
        )
    }

    /// Replace the campaign selection. An empty selection matches nothing.
    pub fn campaigns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.campaign_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = date;
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = date;
        self
    }

    /// Apply optional narrowing on top of this selection. An empty
    /// `campaigns` list keeps the current campaign set; `None` dates keep
    /// the current bounds.
    pub fn narrowed<S: AsRef<str>>(
        mut self,
        campaigns: &[S],
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Self {
        if !campaigns.is_empty() {
            self = self.campaigns(campaigns.iter().map(|c| c.as_ref().to_string()));
        }
        if let Some(date) = date_from {
            self.date_from = date;
        }
        if let Some(date) = date_to {
            self.date_to = date;
        }
        self
    }

    pub fn matches(&self, record: &AdRecord) -> bool {
        self.campaign_names.contains(&record.campaign_name)
            && record.date_start >= self.date_from
            && record.date_stop <= self.date_to
    }
}

/// Keep the records matching `criteria`, preserving order.
pub fn filter(records: &[AdRecord], criteria: &FilterCriteria) -> Vec<AdRecord> {
    let kept: Vec<AdRecord> = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();
    log::debug!(
        "Filter kept {} of {} records ({} campaigns, {}..={})",
        kept.len(),
        records.len(),
        criteria.campaign_names.len(),
        criteria.date_from,
        criteria.date_to
    );
    kept
}
