//! Report-period tokens and deterministic date-range resolution.
//!
//! Every function here is a pure function of its arguments; callers inject
//! `now` instead of reading the system clock, so resolution is reproducible
//! in tests.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// User-selectable report window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeriodToken {
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl PeriodToken {
    /// Number of calendar months the token spans.
    pub fn months(&self) -> u32 {
        match self {
            PeriodToken::OneMonth => 1,
            PeriodToken::ThreeMonths => 3,
            PeriodToken::SixMonths => 6,
            PeriodToken::OneYear => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodToken::OneMonth => "1month",
            PeriodToken::ThreeMonths => "3months",
            PeriodToken::SixMonths => "6months",
            PeriodToken::OneYear => "1year",
        }
    }

    /// Resolves the token against a reference instant into the current
    /// window and the equal-length window immediately before it.
    ///
    /// The current window covers the trailing N calendar months ending at
    /// `now`, inclusive of the current partial month; for `1month` that
    /// degenerates to the month-to-date range. The previous window covers
    /// the N full calendar months before the current one, so both always
    /// span the same number of calendar months.
    pub fn resolve(&self, now: NaiveDate) -> ResolvedPeriod {
        let months = self.months();
        let current_start = first_of_month(shift_month(now, -(months as i32 - 1)));
        let current = DateRange::new(current_start, day_after(now));
        let previous_start = first_of_month(shift_month(current_start, -(months as i32)));
        let previous = DateRange::new(previous_start, current_start);
        ResolvedPeriod {
            current,
            previous,
            months,
        }
    }
}

impl FromStr for PeriodToken {
    type Err = ExpenseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "1month" => Ok(PeriodToken::OneMonth),
            "3months" => Ok(PeriodToken::ThreeMonths),
            "6months" => Ok(PeriodToken::SixMonths),
            "1year" => Ok(PeriodToken::OneYear),
            other => Err(ExpenseError::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range wide enough to cover every representable record date.
    pub fn all_time() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// First day of every calendar month the range touches, ascending.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        let mut starts = Vec::new();
        if self.start >= self.end {
            return starts;
        }
        let mut cursor = first_of_month(self.start);
        let last = first_of_month(self.end.pred_opt().unwrap_or(self.end));
        while cursor <= last {
            starts.push(cursor);
            cursor = first_of_month(shift_month(cursor, 1));
        }
        starts
    }

    /// Number of calendar months the range touches.
    pub fn month_count(&self) -> u32 {
        self.month_starts().len() as u32
    }
}

/// A period token resolved against a concrete `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub current: DateRange,
    pub previous: DateRange,
    pub months: u32,
}

/// Month-to-date window for the dashboard's "this month" card.
pub fn month_to_date(now: NaiveDate) -> DateRange {
    DateRange::new(first_of_month(now), day_after(now))
}

/// The full calendar month before `now`'s month.
pub fn previous_month(now: NaiveDate) -> DateRange {
    let current_start = first_of_month(now);
    DateRange::new(first_of_month(shift_month(current_start, -1)), current_start)
}

/// ISO week-to-date window (weeks start on Monday).
pub fn week_to_date(now: NaiveDate) -> DateRange {
    DateRange::new(start_of_week(now), day_after(now))
}

/// The full ISO week before `now`'s week.
pub fn previous_week(now: NaiveDate) -> DateRange {
    let current_start = start_of_week(now);
    DateRange::new(current_start - Duration::days(7), current_start)
}

/// Trailing window of `months` calendar months ending at `now`, inclusive
/// of the current partial month. Used by the dashboard's chart series.
pub fn trailing_months(now: NaiveDate, months: u32) -> DateRange {
    let start = first_of_month(shift_month(now, -(months as i32 - 1)));
    DateRange::new(start, day_after(now))
}

/// Abbreviated month label ("Jan", "Feb", ...) for a date's month.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    let delta = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(delta)
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Shifts a date by whole calendar months, clamping the day to the target
/// month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "2weeks".parse::<PeriodToken>().expect_err("must fail");
        assert!(matches!(err, ExpenseError::InvalidPeriod(ref raw) if raw == "2weeks"));
    }

    #[test]
    fn one_month_resolves_to_month_to_date_and_full_prior_month() {
        let resolved = PeriodToken::OneMonth.resolve(date(2024, 2, 15));
        assert_eq!(resolved.current.start, date(2024, 2, 1));
        assert_eq!(resolved.current.end, date(2024, 2, 16));
        assert_eq!(resolved.previous.start, date(2024, 1, 1));
        assert_eq!(resolved.previous.end, date(2024, 2, 1));
        assert_eq!(resolved.months, 1);
    }

    #[test]
    fn three_months_windows_are_contiguous_and_equal_length() {
        let resolved = PeriodToken::ThreeMonths.resolve(date(2024, 2, 29));
        assert_eq!(resolved.current.start, date(2023, 12, 1));
        assert_eq!(resolved.current.end, date(2024, 3, 1));
        assert_eq!(resolved.previous.start, date(2023, 9, 1));
        assert_eq!(resolved.previous.end, date(2023, 12, 1));
        assert_eq!(resolved.current.month_count(), 3);
        assert_eq!(resolved.previous.month_count(), 3);
    }

    #[test]
    fn one_year_spans_twelve_months_across_year_boundary() {
        let resolved = PeriodToken::OneYear.resolve(date(2024, 6, 10));
        assert_eq!(resolved.current.start, date(2023, 7, 1));
        assert_eq!(resolved.current.month_count(), 12);
        assert_eq!(resolved.previous.start, date(2022, 7, 1));
        assert_eq!(resolved.previous.end, date(2023, 7, 1));
    }

    #[test]
    fn resolution_is_deterministic() {
        let now = date(2024, 11, 3);
        assert_eq!(
            PeriodToken::SixMonths.resolve(now),
            PeriodToken::SixMonths.resolve(now)
        );
    }

    #[test]
    fn month_starts_zero_fill_sparse_ranges() {
        let range = DateRange::new(date(2023, 12, 1), date(2024, 3, 1));
        let starts = range.month_starts();
        assert_eq!(
            starts,
            vec![date(2023, 12, 1), date(2024, 1, 1), date(2024, 2, 1)]
        );
    }

    #[test]
    fn week_windows_start_on_monday() {
        // 2024-02-29 is a Thursday.
        let current = week_to_date(date(2024, 2, 29));
        assert_eq!(current.start, date(2024, 2, 26));
        assert_eq!(current.end, date(2024, 3, 1));
        let previous = previous_week(date(2024, 2, 29));
        assert_eq!(previous.start, date(2024, 2, 19));
        assert_eq!(previous.end, date(2024, 2, 26));
    }

    #[test]
    fn shift_month_clamps_to_month_length() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
    }
}
