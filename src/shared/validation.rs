//! Input checks shared by every handler. Each returns a typed value or the
//! `AppError` the handler should surface, before any storage access happens.

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Calendar date format accepted by date-range queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record identifier taken from the request path.
pub fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId("invalid id".to_string()))
}

/// Reject a missing or exactly-empty query parameter. Whitespace-only values
/// are passed through.
pub fn require_query<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingParameter(format!(
            "{} parameter is required",
            name
        ))),
    }
}

/// Which end of a date range failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBoundary {
    Start,
    End,
}

impl DateBoundary {
    fn as_str(&self) -> &'static str {
        match self {
            DateBoundary::Start => "start",
            DateBoundary::End => "end",
        }
    }
}

pub fn parse_date(raw: &str, boundary: DateBoundary) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(format!("invalid {} date", boundary.as_str())))
}

/// Half-open creation-time window `[start, end)` covering whole calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    /// Midnight after the last included day
    pub end: DateTime<Utc>,
}

impl DateRange {
    #[cfg(test)]
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts < self.end
    }
}

/// Build the inclusive `start..=end` day range from raw query values.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(AppError::MissingParameter(
            "start and end date required".to_string(),
        ));
    };

    let start = parse_date(start, DateBoundary::Start)?;
    let end = parse_date(end, DateBoundary::End)?;

    let end_exclusive = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidDate("invalid end date".to_string()))?;

    Ok(DateRange {
        start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
        end: end_exclusive.and_time(chrono::NaiveTime::MIN).and_utc(),
    })
}
