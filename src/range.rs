use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MonthDay, ParseError, RANGE_SEPARATOR, prelude::*};

/// A closed range between two month-days on the reference year.
/// The end must fall strictly after the start, so ranges never wrap past
/// December 31st and are never a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct MonthDayRange {
    start: MonthDay,
    end:   MonthDay,
}

/// Error type for month-day range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// End date is on or before start date.
    #[error("Invalid period: end ({end}) must be after start ({start})")]
    EndNotAfterStart { start: MonthDay, end: MonthDay },

    /// Error parsing one of the endpoints.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

/// Closed-interval overlap test on raw endpoints: `cs <= ee && ce >= es`.
/// Touching endpoints count as overlapping.
#[inline]
pub fn overlaps(
    candidate_start: MonthDay,
    candidate_end: MonthDay,
    existing_start: MonthDay,
    existing_end: MonthDay,
) -> bool {
    candidate_start <= existing_end && candidate_end >= existing_start
}

impl MonthDayRange {
    /// Creates a new range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::EndNotAfterStart` if `end <= start`.
    pub fn new(start: MonthDay, end: MonthDay) -> Result<Self, RangeError> {
        if !end.is_after(&start) {
            return Err(RangeError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the last day of the range (inclusive)
    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// Returns both endpoints as a tuple
    pub const fn dates(&self) -> (MonthDay, MonthDay) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given month-day (endpoints included)
    pub fn contains(&self, date: &MonthDay) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks whether a concrete date falls inside the range, whatever its year.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        MonthDay::try_from(date).is_ok_and(|md| self.contains(&md))
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Anchors the range on a concrete academic year.
    /// Returns `None` if an endpoint is `02-29` and `year` is not a leap year.
    pub fn in_year(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start.with_year(year)?, self.end.with_year(year)?))
    }
}

impl FromStr for MonthDayRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<MonthDay>()?;
                let end = end_str.trim().parse::<MonthDay>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for MonthDayRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDayRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
