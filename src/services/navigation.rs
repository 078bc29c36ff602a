// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month navigation.
//!
//! This is the only place out-of-range months are normalized; everything
//! downstream receives a month in `0..=11`.

use serde::Serialize;

use crate::models::{DateTime, ValidationError};
use crate::time_utils::month_key;

/// A (year, 0-based month) pair that is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Build a cursor, rolling any month outside `0..=11` into the
    /// neighbouring years (`-1` is December of the previous year).
    /// The year saturates at the `i32` bounds.
    pub fn new(year: i32, month: i32) -> Self {
        let year = year.saturating_add(month.div_euclid(12));
        let month = month.rem_euclid(12) as u32;
        Self { year, month }
    }

    /// Build a cursor, rejecting months outside `0..=11`.
    pub fn from_parts(year: i32, month: u32) -> Result<Self, ValidationError> {
        if month > 11 {
            return Err(ValidationError::InvalidDate(format!(
                "month {} out of range 0..=11",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: DateTime) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 0-based month.
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn offset(self, months: i32) -> Self {
        Self::new(self.year, (self.month as i32).saturating_add(months))
    }

    pub fn contains(self, date: DateTime) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `"YYYY-MM"` (1-based month).
    pub fn month_key(self) -> String {
        month_key(self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_overflowing_months() {
        assert_eq!(MonthCursor::new(2024, 12), MonthCursor::new(2025, 0));
        assert_eq!(MonthCursor::new(2024, -1), MonthCursor::new(2023, 11));
        assert_eq!(MonthCursor::new(2024, -13), MonthCursor::new(2022, 11));
        assert_eq!(MonthCursor::new(2024, 25).month_key(), "2026-02");
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        assert_eq!(MonthCursor::new(i32::MAX, 12).year(), i32::MAX);
        assert_eq!(MonthCursor::new(i32::MIN, -1).year(), i32::MIN);
        assert_eq!(MonthCursor::new(2024, i32::MAX).month(), (i32::MAX % 12) as u32);
        assert_eq!(MonthCursor::new(2024, 0).offset(i32::MAX).year(), 2024 + i32::MAX / 12);
    }

    #[test]
    fn test_next_and_previous_roll_years() {
        let december = MonthCursor::new(2024, 11);
        assert_eq!(december.next().month_key(), "2025-01");
        let january = MonthCursor::new(2024, 0);
        assert_eq!(january.previous().month_key(), "2023-12");
        assert_eq!(january.offset(-24).month_key(), "2022-01");
    }

    #[test]
    fn test_from_parts_rejects_out_of_range() {
        assert!(MonthCursor::from_parts(2024, 12).is_err());
        assert_eq!(
            MonthCursor::from_parts(2024, 11).unwrap(),
            MonthCursor::new(2024, 11)
        );
    }

    #[test]
    fn test_contains() {
        let cursor = MonthCursor::new(2024, 1);
        assert!(cursor.contains(DateTime::from_ymd(2024, 1, 29).unwrap()));
        assert!(!cursor.contains(DateTime::from_ymd(2023, 1, 28).unwrap()));
        assert_eq!(
            MonthCursor::containing(DateTime::from_ymd(2024, 1, 29).unwrap()),
            cursor
        );
    }
}
