//! Display formatting for KPI values.

const NOT_AVAILABLE: &str = "n/a";

/// Insert `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Two decimals with thousands separators, e.g. `1,234.50`.
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// `$1,234.57`
pub fn format_currency(value: f64) -> String {
    let s = format_decimal(value);
    match s.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${s}"),
    }
}

/// `1,234`
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `2.35%` for a value already in percentage points.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Currency for an average; `n/a` when there was nothing to average.
pub fn format_avg_currency(value: Option<f64>) -> String {
    value
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Percent for an average; `n/a` when there was nothing to average.
pub fn format_avg_percent(value: Option<f64>) -> String {
    value
        .map(format_percent)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
