/// Utilities for date and time formatting
///
/// Report payloads carry ISO dates ("2024-03-15", "2024-03-15T14:02:26Z").
/// Unparseable input is returned unchanged.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_DATE: &str = "%b %-d, %Y";
const DISPLAY_DATETIME: &str = "%b %-d, %Y %H:%M";

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(value).map(|dt| dt.date()))
}

/// Format ISO date string to "Mon D, YYYY"
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "Mar 15, 2024"
pub fn format_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(date) => date.format(DISPLAY_DATE).to_string(),
        None => date_str.to_string(),
    }
}

/// Format ISO datetime string to "Mon D, YYYY HH:MM"
/// Example: "2024-03-15T14:02:26.123Z" -> "Mar 15, 2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some(dt) = parse_datetime(datetime_str) {
        return dt.format(DISPLAY_DATETIME).to_string();
    }
    match NaiveDate::parse_from_str(datetime_str.trim(), "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => datetime_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "Mar 15, 2024 14:02"
        );
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "Dec 31, 2024 23:59");
        assert_eq!(format_datetime("2024-12-31"), "Dec 31, 2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "Mar 15, 2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("N/A"), "N/A");
    }
}
