//! Day-month-year event date parsing

use chrono::NaiveDate;

use crate::events::EventError;

/// Parse an event date of the form `DD-MM-YYYY`.
///
/// Exactly three `-`-separated components are required, each made only of
/// ASCII digits: day and month of one or two digits, year of exactly four.
/// The result must be a real calendar date. Anything else is rejected rather
/// than reinterpreted.
pub fn parse_event_date(input: &str) -> Result<NaiveDate, EventError> {
    let malformed = |reason| EventError::MalformedDate {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(malformed("date is empty"));
    }

    let parts: Vec<&str> = trimmed.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(malformed("expected three '-'-separated components (DD-MM-YYYY)"));
    };

    if [day, month, year]
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(malformed("components must be numeric"));
    }
    if day.len() > 2 || month.len() > 2 {
        return Err(malformed("day and month must have one or two digits"));
    }
    if year.len() != 4 {
        return Err(malformed("year must have four digits"));
    }

    // Digit-only and length-bounded, so these cannot fail
    let (d, m, y) = match (day.parse(), month.parse(), year.parse()) {
        (Ok(d), Ok(m), Ok(y)) => (d, m, y),
        _ => return Err(malformed("components must be numeric")),
    };

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| malformed("no such calendar date"))
}
