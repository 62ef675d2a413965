//! Recurring, year-less academic periods and compact pager windows.
//!
//! A [`MonthDay`] is a calendar date without a year (`MM-DD`). Periods are
//! closed [`MonthDayRange`]s between two of them, and [`validate()`] checks a
//! proposed period against the ones that already exist. [`generate`] produces
//! the abbreviated page list a table pager renders.

mod config;
mod consts;
mod pagination;
mod period;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;
mod validate;

pub use config::{ConfigError, PagerConfig, Settings};
pub use consts::*;
pub use pagination::{PageItem, PageWindow, Pagination, PaginationError, generate};
pub use period::{Period, PeriodId, PeriodRecord};
pub use range::{MonthDayRange, RangeError, overlaps};
pub use types::{Day, Month};
pub use validate::{
    DateField, PeriodDraft, PeriodRules, PeriodValidator, Rejection, RejectionKind, ValidationReport,
    ValidationResult, first_conflict, validate,
};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// A calendar date without a year, e.g. `01-15` for January 15th.
///
/// Values are validated against the month lengths of [`REFERENCE_YEAR`], and
/// ordering follows the reference-year timeline (month first, then day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}-{:02}", "month.get()", "day.get()")]
pub struct MonthDay {
    month: Month,
    day:   Day,
}

/// Which rule a month-day string broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Not two numeric parts separated by `-`
    Format,
    /// Month or day outside the calendar
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid month-day format: {_0:?} (expected MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidDay { month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Collapses the error into format vs. range, the distinction forms report.
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidFormat(_) => ParseErrorKind::Format,
            Self::InvalidMonth(_) | Self::InvalidDay { .. } => ParseErrorKind::Range,
        }
    }
}

impl MonthDay {
    /// Creates a month-day, validating both components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the
    /// pair does not exist on the reference year.
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        let Some(m) = Month::new(month) else {
            return Err(ParseError::InvalidMonth(month));
        };
        let Some(d) = Day::new(day, m) else {
            return Err(ParseError::InvalidDay { month, day });
        };
        Ok(Self { month: m, day: d })
    }

    /// Returns the month component (1-12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component (1-31)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// True iff `self` falls strictly later in the year than `other`.
    #[inline]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Places this month-day on a concrete year.
    /// Returns `None` for `02-29` on a non-leap year.
    pub fn with_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, u32::from(self.month()), u32::from(self.day()))
    }

    fn parse_component(s: &str, whole: &str) -> Result<u8, ParseError> {
        let well_formed = !s.is_empty()
            && s.len() <= MAX_COMPONENT_DIGITS
            && s.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ParseError::InvalidFormat(whole.to_owned()));
        }
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(whole.to_owned()))
    }
}

impl FromStr for MonthDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (month, day) = trimmed
            .split_once(MONTH_DAY_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;

        // Components must be bare digits; a second separator ends up in `day` and fails here
        let month = Self::parse_component(month, s)?;
        let day = Self::parse_component(day, s)?;

        Self::new(month, day)
    }
}

/// Parses an `MM-DD` string.
///
/// # Errors
/// `ParseError::InvalidFormat` unless the input is two numeric parts of one or
/// two digits; `InvalidMonth`/`InvalidDay` when the date does not exist.
pub fn parse_month_day(s: &str) -> Result<MonthDay, ParseError> {
    s.parse()
}

impl TryFrom<NaiveDate> for MonthDay {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidMonth(u8::MAX))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidDay { month, day: u8::MAX })?;
        Self::new(month, day)
    }
}

impl serde::Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
