// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for month keys and timestamps.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// `"YYYY-MM"` key for a 0-based month.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month + 1)
}

/// Milliseconds since the epoch, reading the wall-clock time as UTC.
///
/// Only used for differences between instants from the same clock.
pub fn epoch_millis(at: NaiveDateTime) -> i64 {
    at.and_utc().timestamp_millis()
}

/// Number of days in a 0-based month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 11 {
        (year + 1, 1)
    } else {
        (year, month + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}
