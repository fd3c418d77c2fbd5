//! Display formatting shared by metric cards and table cells.

use crate::shared::date_utils::{format_date, format_datetime};
use contracts::shared::reports::ValueFormat;
use serde_json::Value;

const DEFAULT_FIXED_DECIMALS: usize = 2;
const CURRENCY_MAX_FRACTION: usize = 3;
const CURRENCY_SYMBOL: &str = "$";

/// `in_stock` -> `In Stock`, `pre-owned` -> `Pre-Owned`
///
/// Underscores become spaces and the first letter of each word (after a
/// space or hyphen) is upper-cased; the rest of the word is left as is.
pub fn humanize_label(code: &str) -> String {
    let mut result = String::with_capacity(code.len());
    let mut word_start = true;
    for c in code.chars() {
        let c = if c == '_' { ' ' } else { c };
        if word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        word_start = c == ' ' || c == '-';
    }
    result
}

/// Inserts `separator` every three digits of an unsigned integer string
fn group_thousands(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Number with comma grouping and at most `max_fraction` decimals,
/// trailing zeros dropped: 1234.5 -> "1,234.5", 1000.0 -> "1,000"
pub fn format_locale(value: f64, max_fraction: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (integer_part, fraction) = match fixed.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.trim_end_matches('0').to_string()),
        None => (fixed.clone(), String::new()),
    };
    let grouped = group_thousands(&integer_part, ',');
    let body = if fraction.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, fraction)
    };
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", body)
    } else {
        body
    }
}

/// Number with comma grouping and exactly `decimals` decimals
pub fn format_grouped_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer_part, fraction) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };
    let grouped = group_thousands(integer_part, ',');
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Shortest representation: 120.0 -> "120", 12.5 -> "12.5"
pub fn format_plain_number(value: f64) -> String {
    format!("{}", value)
}

/// Numeric view of a payload value; numeric strings count as numbers
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Display text of a value without any format applied
pub fn display_plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_plain_number(f),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "active" | "yes" | "1" => Some(true),
            "false" | "inactive" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Formats a payload value for display.
///
/// Text that does not fit a numeric format (e.g. an `"N/A"` default) is
/// shown unchanged.
pub fn format_value(value: &Value, format: ValueFormat, decimals: Option<u8>) -> String {
    let decimals = decimals.map(usize::from);
    match format {
        ValueFormat::Plain => display_plain(value),
        ValueFormat::Integer => match as_number(value) {
            Some(n) => format_locale(n.round(), 0),
            None => display_plain(value),
        },
        ValueFormat::Number => match as_number(value) {
            Some(n) => format!("{:.*}", decimals.unwrap_or(DEFAULT_FIXED_DECIMALS), n),
            None => display_plain(value),
        },
        ValueFormat::Percent => match as_number(value) {
            Some(n) => match decimals {
                Some(d) => format!("{:.*}%", d, n),
                None => format!("{}%", format_plain_number(n)),
            },
            None => display_plain(value),
        },
        ValueFormat::Currency => match as_number(value) {
            Some(n) => {
                let amount = match decimals {
                    Some(d) => format_grouped_fixed(n.abs(), d),
                    None => format_locale(n.abs(), CURRENCY_MAX_FRACTION),
                };
                let negative = n < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0');
                if negative {
                    format!("-{}{}", CURRENCY_SYMBOL, amount)
                } else {
                    format!("{}{}", CURRENCY_SYMBOL, amount)
                }
            }
            None => display_plain(value),
        },
        ValueFormat::Date => match value {
            Value::String(s) => format_date(s),
            other => display_plain(other),
        },
        ValueFormat::DateTime => match value {
            Value::String(s) => format_datetime(s),
            other => display_plain(other),
        },
        ValueFormat::Boolean => match is_truthy(value) {
            Some(true) => "Active".to_string(),
            Some(false) => "Inactive".to_string(),
            None => display_plain(value),
        },
        ValueFormat::Humanize => match value {
            Value::String(s) => humanize_label(s),
            other => display_plain(other),
        },
    }
}
