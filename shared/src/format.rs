//! Display helpers for timestamps, durations and long text.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses the timestamps the service emits. Offsets are honoured; naive
/// values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// "May 1, 2024"; the raw value when it does not parse.
pub fn format_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|ts| ts.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn format_time(value: &str) -> String {
    parse_timestamp(value)
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn format_date_time(value: &str) -> String {
    parse_timestamp(value)
        .map(|ts| ts.format("%b %-d, %Y %H:%M:%S").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Call duration as `m:ss`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Cuts `text` to `max_chars` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let with_offset = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        let naive = parse_timestamp("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(with_offset.format("%H:%M").to_string(), "10:00");
        assert_eq!(naive.format("%H:%M").to_string(), "10:00");
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn formats_dates_and_falls_back_to_raw_text() {
        assert_eq!(format_date("2024-05-01T10:00:00Z"), "May 1, 2024");
        assert_eq!(format_date_time("2024-05-01T10:00:07Z"), "May 1, 2024 10:00:07");
        assert_eq!(format_time("2024-05-01T10:05:00Z"), "10:05");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn durations_pad_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("señales de alarma", 7), "señales...");
    }
}
