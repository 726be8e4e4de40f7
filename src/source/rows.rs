use chrono::NaiveDate;
use serde_json::Value;

use crate::date_util::parse_sheet_date;
use crate::error::{Error, Result};
use crate::model::AdRecord;

/// Column headers every sheet must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "campaign_name",
    "date_start",
    "date_stop",
    "spend",
    "clicks",
    "impressions",
    "cpc",
    "ctr",
];

/// Header row (sheet row 1) is consumed, so the first data row is row 2.
const FIRST_DATA_ROW: usize = 2;

struct ColumnIndex {
    campaign_name: usize,
    date_start: usize,
    date_stop: usize,
    spend: usize,
    clicks: usize,
    impressions: usize,
    cpc: usize,
    ctr: usize,
}

impl ColumnIndex {
    fn from_header(header: &[Value]) -> Result<Self> {
        let names: Vec<String> = header.iter().map(cell_text).collect();
        let find = |col: &str| -> Result<usize> {
            names
                .iter()
                .position(|n| n.trim() == col)
                .ok_or_else(|| Error::data_format(1, col, "missing required column"))
        };
        Ok(Self {
            campaign_name: find("campaign_name")?,
            date_start: find("date_start")?,
            date_stop: find("date_stop")?,
            spend: find("spend")?,
            clicks: find("clicks")?,
            impressions: find("impressions")?,
            cpc: find("cpc")?,
            ctr: find("ctr")?,
        })
    }
}

/// Convert a raw values grid (header row first) into typed records.
///
/// Short rows are padded with blanks, fully blank rows are skipped, and any
/// cell that cannot be coerced to its column type aborts the whole load.
pub fn records_from_values(values: &[Vec<Value>]) -> Result<Vec<AdRecord>> {
    let Some((header, rows)) = values.split_first() else {
        log::warn!("Sheet is empty (no header row)");
        return Ok(Vec::new());
    };
    let cols = ColumnIndex::from_header(header)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_num = i + FIRST_DATA_ROW;
        if row.iter().all(is_blank) {
            continue;
        }
        let record = record_from_row(row, &cols, row_num)?;
        if record.date_start > record.date_stop {
            log::warn!(
                "Row {row_num}: date_start {} is after date_stop {}",
                record.date_start,
                record.date_stop
            );
        }
        records.push(record);
    }
    Ok(records)
}

fn record_from_row(row: &[Value], cols: &ColumnIndex, row_num: usize) -> Result<AdRecord> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Value::Null);

    Ok(AdRecord {
        campaign_name: cell_text(cell(cols.campaign_name)),
        date_start: date_cell(cell(cols.date_start), row_num, "date_start")?,
        date_stop: date_cell(cell(cols.date_stop), row_num, "date_stop")?,
        spend: decimal_cell(cell(cols.spend), row_num, "spend")?,
        clicks: count_cell(cell(cols.clicks), row_num, "clicks")?,
        impressions: count_cell(cell(cols.impressions), row_num, "impressions")?,
        cpc: decimal_cell(cell(cols.cpc), row_num, "cpc")?,
        ctr: decimal_cell(cell(cols.ctr), row_num, "ctr")?,
    })
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn date_cell(v: &Value, row: usize, column: &str) -> Result<NaiveDate> {
    match v {
        Value::String(s) => parse_sheet_date(s)
            .ok_or_else(|| Error::data_format(row, column, format!("unrecognized date '{s}'"))),
        Value::Null => Err(Error::data_format(row, column, "date is blank")),
        other => Err(Error::data_format(
            row,
            column,
            format!("expected a date, got {other}"),
        )),
    }
}

/// Strip currency, percent and thousands separators from a numeric string.
fn clean_numeric(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ',' | ' '))
        .collect()
}

fn decimal_cell(v: &Value, row: usize, column: &str) -> Result<f64> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = clean_numeric(s);
            if cleaned.is_empty() {
                log::debug!("Row {row}: blank {column}, treating as 0");
                Some(0.0)
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        Value::Null => {
            log::debug!("Row {row}: blank {column}, treating as 0");
            Some(0.0)
        }
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| Error::data_format(row, column, format!("expected a number, got {v}")))
}

fn count_cell(v: &Value, row: usize, column: &str) -> Result<u64> {
    let as_count = |f: f64| (f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64);
    let parsed = match v {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(as_count)),
        Value::String(s) => {
            let cleaned = clean_numeric(s);
            if cleaned.is_empty() {
                log::debug!("Row {row}: blank {column}, treating as 0");
                Some(0)
            } else {
                cleaned
                    .parse::<u64>()
                    .ok()
                    .or_else(|| cleaned.parse::<f64>().ok().and_then(as_count))
            }
        }
        Value::Null => {
            log::debug!("Row {row}: blank {column}, treating as 0");
            Some(0)
        }
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::data_format(
            row,
            column,
            format!("expected a non-negative integer, got {v}"),
        )
    })
}
