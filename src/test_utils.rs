//! Shared constructors for unit tests.

use proptest::prelude::*;

use crate::{MonthDay, MonthDayRange, Period, PeriodDraft, PeriodId};

pub fn md(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).expect("test month-day must be valid")
}

pub fn range(start: &str, end: &str) -> MonthDayRange {
    let start = start.parse().expect("test range start must parse");
    let end = end.parse().expect("test range end must parse");
    MonthDayRange::new(start, end).expect("test range must be ordered")
}

pub fn period(id: PeriodId, name: &str, start: &str, end: &str) -> Period {
    Period::new(id, name, range(start, end))
}

pub fn draft(name: &str, start: &str, end: &str) -> PeriodDraft {
    PeriodDraft::new(name, start, end)
}

/// Every month-day that exists on the reference year.
pub fn month_day_strategy() -> impl Strategy<Value = MonthDay> {
    (1u8..=12, 1u8..=31).prop_filter_map("day must exist in month", |(m, d)| MonthDay::new(m, d).ok())
}
