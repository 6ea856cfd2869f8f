//! Outlook issue time from the SPC outlook index page.

use chrono::{DateTime, NaiveDate, Utc};
use ingestion::HttpFetcher;
use regex::Regex;
use tracing::info;

use crate::error::{OutlookError, Result};
use crate::hazard::OUTLOOK_INDEX_URL;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const UPDATED_PATTERN: &str =
    r"Updated:\s*[A-Z][a-z]{2}\s+([A-Z][a-z]{2})\s+(\d{1,2})\s+(\d{2}):(\d{2}):(\d{2})\s+UTC\s+(\d{4})";

/// Find `Updated: Www Mmm D HH:MM:SS UTC YYYY` in the index page.
pub fn parse_issue_time(page: &str) -> Result<DateTime<Utc>> {
    let caps = Regex::new(UPDATED_PATTERN)?
        .captures(page)
        .ok_or(OutlookError::IssueTimeNotFound)?;
    let number = |i: usize| caps[i].parse::<u32>().map_err(|_| OutlookError::IssueTimeNotFound);

    let month = MONTHS
        .iter()
        .position(|m| *m == &caps[1])
        .ok_or(OutlookError::IssueTimeNotFound)? as u32
        + 1;
    let year = caps[6]
        .parse::<i32>()
        .map_err(|_| OutlookError::IssueTimeNotFound)?;

    let (day, hour, minute, second) = (number(2)?, number(3)?, number(4)?, number(5)?);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .map(|t| t.and_utc())
        .ok_or(OutlookError::IssueTimeNotFound)
}

/// Fetch the index page and read its issue time.
pub async fn fetch_issue_time(fetcher: &HttpFetcher) -> Result<DateTime<Utc>> {
    let page = fetcher.get_text(OUTLOOK_INDEX_URL).await?;
    let issue = parse_issue_time(&page)?;
    info!(issue_time = %issue, "Outlook issue time");
    Ok(issue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_index_fixture() {
        let issue = parse_issue_time(test_utils::SAMPLE_OUTLOOK_INDEX).unwrap();
        assert_eq!(issue, Utc.with_ymd_and_hms(2023, 6, 18, 16, 12, 3).unwrap());
    }

    #[test]
    fn test_single_digit_day() {
        let issue = parse_issue_time("Updated: Thu Jun  8 01:00:59 UTC 2023").unwrap();
        assert_eq!(issue, Utc.with_ymd_and_hms(2023, 6, 8, 1, 0, 59).unwrap());
    }

    #[test]
    fn test_missing_stamp() {
        assert!(matches!(
            parse_issue_time("<html>maintenance</html>"),
            Err(OutlookError::IssueTimeNotFound)
        ));
    }
}
