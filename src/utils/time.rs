use chrono::{DateTime, Utc};

/// Layout of the `CreateDate` report column
pub const CREATE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a key creation timestamp for the report
pub fn format_create_date(dt: &DateTime<Utc>) -> String {
    dt.format(CREATE_DATE_FORMAT).to_string()
}

/// Build a UTC timestamp from epoch seconds and sub-second nanos
pub fn from_epoch(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, nanos)
}

/// Calculate duration between two timestamps in human-readable format
pub fn duration_human(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    let duration = end.signed_duration_since(*start);
    let seconds = duration.num_seconds();

    if seconds < 60 {
        format!("{} seconds", seconds)
    } else if seconds < 3600 {
        format!("{} minutes", seconds / 60)
    } else if seconds < 86400 {
        format!("{:.1} hours", seconds as f64 / 3600.0)
    } else {
        format!("{:.1} days", seconds as f64 / 86400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_create_date() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_create_date(&dt), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_format_drops_subseconds() {
        let dt = from_epoch(1_700_000_000, 999_999_999).unwrap();
        assert_eq!(format_create_date(&dt), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_duration_human() {
        let start = Utc.with_ymd_and_hms(2025, 10, 6, 7, 26, 3).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 10, 6, 8, 26, 3).unwrap();
        assert!(duration_human(&start, &end).contains("1.0 hours"));
    }
}
