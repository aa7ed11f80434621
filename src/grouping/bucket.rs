//! Same-day bucketing within a category

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use super::SeriesPoint;

/// Events of one category that share a day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub date: NaiveDate,
    /// Milliseconds since the Unix epoch at midnight UTC
    pub timestamp: i64,
    pub count: usize,
    pub titles: Vec<String>,
    /// One entry per event, even when they are all the same day
    pub display_dates: Vec<String>,
}

fn day_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Check a strftime-style format string before it is used for display
pub fn validate_date_format(format: &str) -> Result<(), String> {
    if format.is_empty() {
        return Err("date format is empty".to_string());
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date format: {}", format));
    }
    // Time and zone specifiers parse but cannot be applied to a bare date
    let mut trial = String::new();
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    if write!(trial, "{}", sample.format(format)).is_err() {
        return Err(format!("date format needs a time or zone: {}", format));
    }
    Ok(())
}

/// Format a date, falling back to ISO form if the format string is unusable
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Bucket a category's points by day, ordered by timestamp ascending.
/// Titles and display dates keep input order inside each bucket.
pub fn bucket_points(points: &[SeriesPoint], display_format: &str) -> Vec<DateBucket> {
    let mut buckets: BTreeMap<i64, DateBucket> = BTreeMap::new();

    for point in points {
        let timestamp = day_timestamp(point.date);
        let bucket = buckets.entry(timestamp).or_insert_with(|| DateBucket {
            date: point.date,
            timestamp,
            count: 0,
            titles: Vec::new(),
            display_dates: Vec::new(),
        });
        bucket.count += 1;
        bucket.titles.push(point.title.clone());
        bucket
            .display_dates
            .push(format_date(point.date, display_format));
    }

    buckets.into_values().collect()
}
