use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the ads export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    pub campaign_name: String,
    pub date_start: NaiveDate,
    pub date_stop: NaiveDate,
    pub spend: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub cpc: f64,
    /// Click-through rate in percentage points (1.5 means 1.5%).
    pub ctr: f64,
}

/// The full record set from one fetch, in sheet order.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub records: Vec<AdRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<AdRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
