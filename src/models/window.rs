//! Calendar months and evaluation windows
//!
//! `Month` is the bucket key of the month dimension and of budget
//! reconciliation; `DateWindow` bounds which transactions a reconciliation
//! or an aggregation request looks at.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpendscopeError, SpendscopeResult};

/// A calendar month. Orders chronologically.
///
/// Only months whose first day chrono can represent exist, so every month
/// has a start and an end date.
///
/// Serializes as its "YYYY-MM" key so it can be used as a map key in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    first_day: NaiveDate,
}

impl Month {
    /// Create a month, `None` if `month` is outside 1..=12 or the year is
    /// outside the representable date range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Truncate a date to its month
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first_day: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        // Only the last representable month has no successor
        self.next()
            .map_or(NaiveDate::MAX, |next| next.first_day - Duration::days(1))
    }

    pub fn next(&self) -> Option<Self> {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    pub fn prev(&self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    /// Stable key ("2025-01"); chronological under string order for
    /// four-digit years only, so compare months, not keys
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }

    /// Display label ("January 2025")
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// Parse a month from "YYYY-MM"
    pub fn parse(s: &str) -> SpendscopeResult<Self> {
        let invalid = || SpendscopeError::Validation(format!("Invalid month '{}'. Use YYYY-MM", s));

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Month {
    type Error = SpendscopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.key()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> SpendscopeResult<Self> {
        if start > end {
            return Err(SpendscopeError::Validation(format!(
                "Window start {} is after its end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole months from `first` through `last`
    pub fn months(first: Month, last: Month) -> SpendscopeResult<Self> {
        Self::new(first.start_date(), last.end_date())
    }

    /// A single month
    pub fn month(month: Month) -> Self {
        Self {
            start: month.start_date(),
            end: month.end_date(),
        }
    }

    /// A window that contains every representable date
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    /// Build a window from optional month bounds; a missing bound is open
    pub fn from_bounds(first: Option<Month>, last: Option<Month>) -> SpendscopeResult<Self> {
        let start = first.map(|m| m.start_date()).unwrap_or(NaiveDate::MIN);
        let end = last.map(|m| m.end_date()).unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}
