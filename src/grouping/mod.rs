//! Event grouping: flat event records into per-category, per-day series

mod bucket;
mod date;

pub use bucket::{DateBucket, bucket_points, format_date, validate_date_format};
pub use date::parse_event_date;

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::events::{Event, EventError};

/// One event placed on its category row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub title: String,
}

/// All events of one category, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySeries {
    pub category: String,
    pub points: Vec<SeriesPoint>,
}

/// An event left out of the output because its date could not be parsed
#[derive(Debug)]
pub struct RejectedEvent {
    pub event: Event,
    pub error: EventError,
}

/// Result of grouping: the series plus everything that was skipped
#[derive(Debug, Default)]
pub struct Grouping {
    pub series: Vec<CategorySeries>,
    pub rejected: Vec<RejectedEvent>,
}

impl Grouping {
    /// Number of events that made it into a series
    pub fn accepted_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Group events by category.
///
/// Categories appear in the order they are first seen among the accepted
/// events. Within a category, points keep input order. Events with a
/// malformed date are moved to `rejected` and never create a category on
/// their own, so an empty series is never produced. Ids are ignored.
pub fn group_events(events: &[Event]) -> Grouping {
    let mut grouping = Grouping::default();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let date = match parse_event_date(&event.date) {
            Ok(d) => d,
            Err(error) => {
                grouping.rejected.push(RejectedEvent {
                    event: event.clone(),
                    error,
                });
                continue;
            }
        };

        let idx = *index_of.entry(event.category.as_str()).or_insert_with(|| {
            grouping.series.push(CategorySeries {
                category: event.category.clone(),
                points: Vec::new(),
            });
            grouping.series.len() - 1
        });

        grouping.series[idx].points.push(SeriesPoint {
            date,
            title: event.title.clone(),
        });
    }

    grouping
}
