//! `.info` validity descriptor shipped in every outlook bundle.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{OutlookError, Result};

const BEGIN_PREFIX: &str = "Product Valid Time Begin:";
const END_PREFIX: &str = "Product Valid Time End:";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

/// Validity window of one outlook day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ValidityWindow {
    /// Parse descriptor text. Both the begin and end lines are required.
    pub fn parse(text: &str) -> Result<Self> {
        let mut begin = None;
        let mut end = None;
        for line in text.lines().map(str::trim) {
            if let Some(value) = line.strip_prefix(BEGIN_PREFIX) {
                begin = Some(parse_time(value)?);
            } else if let Some(value) = line.strip_prefix(END_PREFIX) {
                end = Some(parse_time(value)?);
            }
        }

        match (begin, end) {
            (Some(begin), Some(end)) => Ok(Self { begin, end }),
            (None, _) => Err(OutlookError::MalformedInfo(format!(
                "missing '{}' line",
                BEGIN_PREFIX
            ))),
            (_, None) => Err(OutlookError::MalformedInfo(format!(
                "missing '{}' line",
                END_PREFIX
            ))),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| OutlookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .map(|t| t.and_utc())
        .map_err(|e| OutlookError::MalformedInfo(format!("bad timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_window() {
        let window = ValidityWindow::parse(
            "Product Valid Time Begin: 2023-06-18 16:30:00+00:00\n\
             Product Valid Time End: 2023-06-19 12:00:00+00:00\n",
        )
        .unwrap();
        assert_eq!(window.begin, Utc.with_ymd_and_hms(2023, 6, 18, 16, 30, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2023, 6, 19, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_end_is_error() {
        let err = ValidityWindow::parse("Product Valid Time Begin: 2023-06-18 16:30:00+00:00\n")
            .unwrap_err();
        assert!(matches!(err, OutlookError::MalformedInfo(_)));
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let err = ValidityWindow::parse(
            "Product Valid Time Begin: 18 June 2023\nProduct Valid Time End: 2023-06-19 12:00:00+00:00\n",
        )
        .unwrap_err();
        assert!(matches!(err, OutlookError::MalformedInfo(_)));
    }
}
