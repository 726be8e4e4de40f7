use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
// `%.f` also matches when the fraction is absent.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Parse a sheet cell into a calendar date.
///
/// Accepts `2025-01-31`, `2025/01/31`, `01/31/2025` and ISO date-times
/// (with or without offset); the time part is dropped, no timezone conversion.
pub fn parse_sheet_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a `YYYY-MM-DD` argument (CLI flags, config).
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_sheet_date("2025-03-09"), Some(d(2025, 3, 9)));
        assert_eq!(parse_sheet_date("  2025-03-09 "), Some(d(2025, 3, 9)));
    }

    #[test]
    fn test_parse_slash_dates() {
        assert_eq!(parse_sheet_date("2025/03/09"), Some(d(2025, 3, 9)));
        assert_eq!(parse_sheet_date("03/09/2025"), Some(d(2025, 3, 9)));
    }

    #[test]
    fn test_parse_datetimes_keep_date() {
        assert_eq!(parse_sheet_date("2025-03-09 23:59:00"), Some(d(2025, 3, 9)));
        assert_eq!(parse_sheet_date("2025-03-09T08:00:00"), Some(d(2025, 3, 9)));
        assert_eq!(
            parse_sheet_date("2025-03-09T23:30:00-08:00"),
            Some(d(2025, 3, 9))
        );
        assert_eq!(parse_sheet_date("2025-03-09 23:30"), Some(d(2025, 3, 9)));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        assert_eq!(parse_sheet_date("2025-03-09T08:00:00.000"), Some(d(2025, 3, 9)));
        assert_eq!(parse_sheet_date("2025-03-09 08:00:00.5"), Some(d(2025, 3, 9)));
        assert_eq!(parse_sheet_date("2025-03-09T08:00:00.000Z"), Some(d(2025, 3, 9)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_sheet_date(""), None);
        assert_eq!(parse_sheet_date("yesterday"), None);
        assert_eq!(parse_sheet_date("2025-13-01"), None);
        assert_eq!(parse_sheet_date("2025-02-30"), None);
    }

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd("2024-02-29"), Some(d(2024, 2, 29)));
        assert_eq!(parse_ymd("02/29/2024"), None);
    }
}
