//! # Temporal Types — UTC Calendar Dates
//!
//! Defines `CalendarDate`, the date type used for document expiry and for
//! the evaluation date passed into every status query.
//!
//! ## Invariant
//!
//! Compliance status is a pure function of (expiry date, evaluation date).
//! Both sides are whole UTC calendar days, so two evaluations on the same
//! day always agree regardless of the time of day they run.
//!
//! Parsing is strict: only zero-padded `YYYY-MM-DD` is accepted. There is
//! no silent fallback for `2024-2-7`, `07/02/2024` or datetime strings.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A UTC calendar date.
///
/// # Construction
///
/// - [`CalendarDate::parse()`]: from a strict `YYYY-MM-DD` string.
/// - [`CalendarDate::from_ymd()`]: from numeric components.
/// - [`CalendarDate::from_naive()`]: from a `chrono::NaiveDate`.
/// - [`CalendarDate::today()`]: the current UTC date. Host applications only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// The current UTC calendar date.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Wrap a `chrono::NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Parse a strict, zero-padded `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let well_formed = s.len() == 10
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(CoreError::InvalidDate(format!(
                "expected YYYY-MM-DD, got {s:?}"
            )));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::InvalidDate(format!("{s:?}: {e}")))
    }

    /// Access the inner `NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Shift by a signed number of days. `None` if the result leaves the
    /// representable range.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let delta = Duration::try_days(days)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Signed number of days from `self` until `other`
    /// (positive when `other` is later).
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_iso8601()
    }
}
