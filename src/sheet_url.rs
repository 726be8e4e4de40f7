use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

static RE_SPREADSHEET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{20,}$").unwrap());

/// Check if a string looks like a Google spreadsheet key.
pub fn is_spreadsheet_id(s: &str) -> bool {
    RE_SPREADSHEET_ID.is_match(s)
}

/// Extract the spreadsheet key from a Google Sheets URL.
///
/// Supported URL patterns:
/// - `https://docs.google.com/spreadsheets/d/<id>`
/// - `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`
/// - `https://docs.google.com/spreadsheets/u/0/d/<id>/edit`
pub fn parse_sheets_url(input: &str) -> Result<String> {
    let url = Url::parse(input).map_err(|e| Error::InvalidIdentifier(e.to_string()))?;

    let host = url.host_str().unwrap_or("");
    if host != "docs.google.com" {
        return Err(Error::InvalidIdentifier(format!(
            "not a Google Sheets URL: {input}"
        )));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    if segments.first() != Some(&"spreadsheets") {
        return Err(Error::InvalidIdentifier(format!(
            "not a spreadsheet URL: {input}"
        )));
    }

    // The key always follows the `d` segment; `/u/<n>/` may precede it.
    segments
        .iter()
        .position(|s| *s == "d")
        .and_then(|i| segments.get(i + 1))
        .filter(|s| is_spreadsheet_id(s))
        .map(|s| s.to_string())
        .ok_or_else(|| Error::InvalidIdentifier(format!("missing spreadsheet key in URL: {input}")))
}

/// Accept either a raw spreadsheet key or a full Sheets URL.
pub fn resolve_spreadsheet_id(input: &str) -> Result<String> {
    let input = input.trim();
    if is_spreadsheet_id(input) {
        return Ok(input.to_string());
    }
    if input.starts_with("http://") || input.starts_with("https://") {
        return parse_sheets_url(input);
    }
    Err(Error::InvalidIdentifier(input.to_string()))
}

/// Metadata endpoint returning only sheet properties (titles, order).
pub fn metadata_url(spreadsheet_id: &str) -> Url {
    let mut url = api_url(&[spreadsheet_id]);
    url.query_pairs_mut().append_pair("fields", "sheets.properties");
    url
}

/// A1 range covering a whole worksheet. The title is always quoted so names
/// like `Q1` are not read as cell references; embedded quotes are doubled.
pub fn sheet_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

/// Values endpoint for a whole worksheet. Numbers come back unformatted,
/// dates as their displayed strings.
pub fn values_url(spreadsheet_id: &str, worksheet: &str) -> Url {
    let range = sheet_range(worksheet);
    let mut url = api_url(&[spreadsheet_id, "values", &range]);
    url.query_pairs_mut()
        .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
        .append_pair("dateTimeRenderOption", "FORMATTED_STRING");
    url
}

fn api_url(segments: &[&str]) -> Url {
    let mut url = Url::parse(SHEETS_API_BASE).expect("static base URL");
    url.path_segments_mut()
        .expect("https URL has path segments")
        .extend(segments);
    url
}
