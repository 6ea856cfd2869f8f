//! Time handling utilities for product timestamps.

use std::path::PathBuf;

use chrono::{DateTime, Timelike, Utc};

/// Display format used on product banners, e.g. `Sun 18 Jun 2023 1600Z`.
pub const BANNER_FORMAT: &str = "%a %-d %b %Y %H%MZ";

/// Drop minutes, seconds and sub-second precision.
pub fn truncate_to_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Date/hour partition below a product family directory: `YYYY/MM/DD/HH00`.
pub fn partition_dir(time: DateTime<Utc>) -> PathBuf {
    let mut path = PathBuf::new();
    path.push(time.format("%Y").to_string());
    path.push(time.format("%m").to_string());
    path.push(time.format("%d").to_string());
    path.push(time.format("%H00").to_string());
    path
}

/// Banner text for a product reference time, optionally extended to the end
/// of its validity window.
pub fn valid_line(reference: DateTime<Utc>, through: Option<DateTime<Utc>>) -> String {
    let mut line = format!("Valid {}", reference.format(BANNER_FORMAT));
    if let Some(end) = through {
        line.push_str(&format!(" through {}", end.format(BANNER_FORMAT)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_to_hour() {
        let t = Utc.with_ymd_and_hms(2023, 6, 18, 16, 12, 3).unwrap();
        assert_eq!(
            truncate_to_hour(t),
            Utc.with_ymd_and_hms(2023, 6, 18, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_partition_dir() {
        let t = Utc.with_ymd_and_hms(2023, 6, 8, 4, 59, 0).unwrap();
        assert_eq!(partition_dir(t), PathBuf::from("2023/06/08/0400"));
    }

    #[test]
    fn test_valid_line() {
        let start = Utc.with_ymd_and_hms(2023, 6, 18, 16, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 6, 19, 12, 0, 0).unwrap();
        assert_eq!(valid_line(start, None), "Valid Sun 18 Jun 2023 1600Z");
        assert_eq!(
            valid_line(start, Some(end)),
            "Valid Sun 18 Jun 2023 1600Z through Mon 19 Jun 2023 1200Z"
        );
    }
}
