mod types;

pub use types::MetricsSummary;

use crate::model::AdRecord;

/// Compute KPI totals and column means over `records`.
///
/// Sums of an empty set are zero; means of an empty set are `None` so an
/// undefined average never reaches formatting or the insight rules.
pub fn aggregate(records: &[AdRecord]) -> MetricsSummary {
    MetricsSummary {
        total_spend: records.iter().map(|r| r.spend).sum(),
        total_clicks: records.iter().map(|r| r.clicks).sum(),
        total_impressions: records.iter().map(|r| r.impressions).sum(),
        avg_cpc: mean(records.iter().map(|r| r.cpc)),
        avg_ctr: mean(records.iter().map(|r| r.ctr)),
        record_count: records.len(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(day: u32, spend: f64, clicks: u64, impressions: u64, cpc: f64, ctr: f64) -> AdRecord {
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        AdRecord {
            campaign_name: "Summer".to_string(),
            date_start: date,
            date_stop: date,
            spend,
            clicks,
            impressions,
            cpc,
            ctr,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sums_and_means() {
        let records = vec![
            rec(1, 10.0, 20, 1000, 0.5, 2.0),
            rec(2, 30.0, 10, 3000, 3.0, 0.5),
        ];
        let m = aggregate(&records);
        assert!(approx(m.total_spend, 40.0));
        assert_eq!(m.total_clicks, 30);
        assert_eq!(m.total_impressions, 4000);
        // Plain column means, not click-weighted ratios.
        assert!(approx(m.avg_cpc.unwrap(), 1.75));
        assert!(approx(m.avg_ctr.unwrap(), 1.25));
        assert_eq!(m.record_count, 2);
    }

    #[test]
    fn test_empty_set() {
        let m = aggregate(&[]);
        assert_eq!(m.total_spend, 0.0);
        assert_eq!(m.total_clicks, 0);
        assert_eq!(m.total_impressions, 0);
        assert_eq!(m.avg_cpc, None);
        assert_eq!(m.avg_ctr, None);
        assert!(m.is_empty());
    }

    #[test]
    fn test_all_zero_spend() {
        let records = vec![
            rec(1, 0.0, 0, 10, 0.0, 0.0),
            rec(2, 0.0, 3, 90, 0.0, 3.3),
        ];
        assert_eq!(aggregate(&records).total_spend, 0.0);
    }

    #[test]
    fn test_sums_are_linear_over_disjoint_sets() {
        let a = vec![rec(1, 12.25, 7, 700, 1.75, 1.0), rec(2, 3.5, 1, 90, 3.5, 1.1)];
        let b = vec![rec(3, 100.0, 250, 9000, 0.4, 2.7)];
        let union: Vec<AdRecord> = a.iter().chain(b.iter()).cloned().collect();

        let (ma, mb, mu) = (aggregate(&a), aggregate(&b), aggregate(&union));
        assert!(approx(mu.total_spend, ma.total_spend + mb.total_spend));
        assert_eq!(mu.total_clicks, ma.total_clicks + mb.total_clicks);
        assert_eq!(mu.total_impressions, ma.total_impressions + mb.total_impressions);
    }

    #[test]
    fn test_single_record_mean_is_value() {
        let m = aggregate(&[rec(1, 5.0, 2, 100, 2.5, 2.0)]);
        assert_eq!(m.avg_cpc, Some(2.5));
        assert_eq!(m.avg_ctr, Some(2.0));
    }
}
