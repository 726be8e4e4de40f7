use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::AdRecord;

/// Total spend for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub spend: f64,
}

/// Chart payload for "Spend Over Time".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum SpendOverTime {
    /// One point per distinct `date_start`, ascending.
    Series(Vec<DailySpend>),
    /// Fewer than two distinct start dates; nothing worth charting.
    NotEnoughVariation,
}

impl SpendOverTime {
    pub fn points(&self) -> &[DailySpend] {
        match self {
            SpendOverTime::Series(points) => points,
            SpendOverTime::NotEnoughVariation => &[],
        }
    }
}

/// Sum spend per `date_start` day. Days with no records get no point.
pub fn bucket_by_day(records: &[AdRecord]) -> Vec<DailySpend> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *days.entry(r.date_start).or_insert(0.0) += r.spend;
    }
    days.into_iter()
        .map(|(date, spend)| DailySpend { date, spend })
        .collect()
}

/// Daily spend series, or [`SpendOverTime::NotEnoughVariation`] when the
/// records cover fewer than two distinct start dates.
pub fn daily_spend(records: &[AdRecord]) -> SpendOverTime {
    let points = bucket_by_day(records);
    if points.len() < 2 {
        SpendOverTime::NotEnoughVariation
    } else {
        SpendOverTime::Series(points)
    }
}
