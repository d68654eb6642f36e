//! Display formatting and lenient numeric parsing
//!
//! Pure, stateless helpers. The upstream ticker API serves most numeric
//! fields as strings and occasionally omits or mangles them; anything
//! that fails to parse is treated as zero rather than an error.

use serde_json::Value;

/// Renders a USD value with a magnitude suffix: `$1.23B`, `$4.56M`, `$7.89K`.
///
/// Thresholds are closed lower bounds checked in descending order, so
/// exactly 1e9 takes the `B` branch. Below 1e3 the value renders as plain
/// two-decimal dollars.
pub fn format_currency(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// Same suffix logic as [`format_currency`] without the currency symbol.
pub fn format_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Signed percent rendering: `+1.25%` / `-0.47%`.
pub fn format_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Parses a decimal number from a string; any failure yields exactly 0.
pub fn safe_parse_float(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// [`safe_parse_float`] over a JSON value: numbers pass through, strings
/// are parsed, everything else (null, bool, arrays, objects) is 0.
pub fn safe_parse_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => safe_parse_float(s),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_suffixes() {
        assert_eq!(format_currency(2_500_000_000.0), "$2.50B");
        assert_eq!(format_currency(3_250_000.0), "$3.25M");
        assert_eq!(format_currency(1_500.0), "$1.50K");
        assert_eq!(format_currency(999.99), "$999.99");
        assert_eq!(format_currency(0.5), "$0.50");
    }

    #[test]
    fn currency_boundaries_take_larger_suffix() {
        assert_eq!(format_currency(1e9), "$1.00B");
        assert_eq!(format_currency(1e6), "$1.00M");
        assert_eq!(format_currency(1e3), "$1.00K");
        assert_eq!(format_currency(999_999_999.0), "$1000.00M");
    }

    #[test]
    fn number_suffixes() {
        assert_eq!(format_number(21_000_000.0), "21.00M");
        assert_eq!(format_number(1e9), "1.00B");
        assert_eq!(format_number(500.0), "500");
        assert_eq!(format_number(999.5), "999.5");
    }

    #[test]
    fn percent_is_signed() {
        assert_eq!(format_percent(1.254), "+1.25%");
        assert_eq!(format_percent(-0.47), "-0.47%");
        assert_eq!(format_percent(0.0), "+0.00%");
    }

    #[test]
    fn safe_parse_accepts_numbers() {
        assert_eq!(safe_parse_float("123.45"), 123.45);
        assert_eq!(safe_parse_float("  -7 "), -7.0);
        assert_eq!(safe_parse_value(&json!(6456.52)), 6456.52);
        assert_eq!(safe_parse_value(&json!("6456.52")), 6456.52);
    }

    #[test]
    fn safe_parse_failures_are_exactly_zero() {
        assert_eq!(safe_parse_float(""), 0.0);
        assert_eq!(safe_parse_float("abc"), 0.0);
        assert_eq!(safe_parse_float("NaN"), 0.0);
        assert_eq!(safe_parse_float("inf"), 0.0);
        assert_eq!(safe_parse_value(&Value::Null), 0.0);
        assert_eq!(safe_parse_value(&json!({})), 0.0);
        assert_eq!(safe_parse_value(&json!([1, 2])), 0.0);
        assert_eq!(safe_parse_value(&json!(true)), 0.0);
    }
}
