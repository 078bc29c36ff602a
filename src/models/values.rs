// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Self-validating scalar value types.
//!
//! Every magnitude is checked once at construction; after that the value is
//! immutable and arithmetic on it cannot produce a negative result.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Errors raised when constructing a value type from untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Activity ID must not be empty")]
    EmptyId,

    #[error("Distance must be non-negative, got {0}")]
    NegativeDistance(f64),

    #[error("Duration must be non-negative, got {0}")]
    NegativeDuration(f64),

    #[error("Calories must be non-negative, got {0}")]
    NegativeCalories(f64),

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

fn check_magnitude(
    value: f64,
    field: &'static str,
    negative: fn(f64) -> ValidationError,
) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value < 0.0 {
        return Err(negative(value));
    }
    Ok(value)
}

// ─── ActivityId ──────────────────────────────────────────────

/// Opaque, non-empty activity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityId(String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityId> for String {
    fn from(id: ActivityId) -> Self {
        id.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Distance ────────────────────────────────────────────────

/// Non-negative distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub fn from_meters(meters: f64) -> Result<Self, ValidationError> {
        check_magnitude(meters, "distance", ValidationError::NegativeDistance).map(Self)
    }

    pub fn from_kilometers(km: f64) -> Result<Self, ValidationError> {
        Self::from_meters(km * 1000.0)
    }

    pub fn meters(self) -> f64 {
        self.0
    }

    pub fn kilometers(self) -> f64 {
        self.0 / 1000.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Average over `count` items; a zero count yields the total unchanged.
    pub fn average_over(self, count: usize) -> Self {
        Self(self.0 / count.max(1) as f64)
    }
}

impl TryFrom<f64> for Distance {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_meters(value)
    }
}

impl From<Distance> for f64 {
    fn from(d: Distance) -> Self {
        d.0
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0 + rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km", self.kilometers())
    }
}

// ─── Duration ────────────────────────────────────────────────

/// Non-negative elapsed time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Duration(f64);

impl Duration {
    pub const ZERO: Duration = Duration(0.0);

    pub fn from_seconds(seconds: f64) -> Result<Self, ValidationError> {
        check_magnitude(seconds, "duration", ValidationError::NegativeDuration).map(Self)
    }

    pub fn from_minutes(minutes: f64) -> Result<Self, ValidationError> {
        Self::from_seconds(minutes * 60.0)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn minutes(self) -> f64 {
        self.0 / 60.0
    }

    pub fn hours(self) -> f64 {
        self.0 / 3600.0
    }

    pub fn average_over(self, count: usize) -> Self {
        Self(self.0 / count.max(1) as f64)
    }

    /// Render as `"1h 30m 5s"`, dropping zero leading units (`"45m 0s"`, `"12s"`).
    pub fn formatted(self) -> String {
        let total = self.0.round() as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl TryFrom<f64> for Duration {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_seconds(value)
    }
}

impl From<Duration> for f64 {
    fn from(d: Duration) -> Self {
        d.0
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Self {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

// ─── Calories ────────────────────────────────────────────────

/// Non-negative energy expenditure in kilocalories.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Calories(f64);

impl Calories {
    pub const ZERO: Calories = Calories(0.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        check_magnitude(value, "calories", ValidationError::NegativeCalories).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn average_over(self, count: usize) -> Self {
        Self(self.0 / count.max(1) as f64)
    }
}

impl TryFrom<f64> for Calories {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Calories> for f64 {
    fn from(c: Calories) -> Self {
        c.0
    }
}

impl Add for Calories {
    type Output = Calories;

    fn add(self, rhs: Calories) -> Calories {
        Calories(self.0 + rhs.0)
    }
}

impl Sum for Calories {
    fn sum<I: Iterator<Item = Calories>>(iter: I) -> Self {
        iter.fold(Calories::ZERO, Add::add)
    }
}

// ─── Pace ────────────────────────────────────────────────────

/// Time per kilometer, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Pace(f64);

impl Pace {
    /// Derive pace from a duration and distance. `None` when no distance was covered.
    pub fn from_duration_and_distance(duration: Duration, distance: Distance) -> Option<Self> {
        if distance.is_zero() {
            return None;
        }
        Some(Self(duration.seconds() / distance.kilometers()))
    }

    pub fn seconds_per_km(self) -> f64 {
        self.0
    }

    pub fn minutes_per_km(self) -> f64 {
        self.0 / 60.0
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.round() as u64;
        write!(f, "{}:{:02} /km", total / 60, total % 60)
    }
}

// ─── DateTime ────────────────────────────────────────────────

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A valid local wall-clock instant.
///
/// Months are exposed 0-based (January = 0) to match the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    /// Build from calendar components; `month` is 0-based.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, ValidationError> {
        let date = NaiveDate::from_ymd_opt(year, month + 1, day).ok_or_else(|| {
            ValidationError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month + 1, day))
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            ValidationError::InvalidDate(format!("{:02}:{:02}:{:02}", hour, minute, second))
        })?;
        Ok(Self(date.and_time(time)))
    }

    /// Midnight on the given date; `month` is 0-based.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Parse RFC 3339 (keeping the wall-clock time of its own offset),
    /// a naive `YYYY-MM-DDTHH:MM:SS` timestamp, or a bare `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(dt.naive_local()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
            return Ok(Self(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self(dt));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(date.and_time(NaiveTime::MIN)));
        }
        Err(ValidationError::InvalidDate(raw.to_string()))
    }

    pub fn naive(self) -> NaiveDateTime {
        self.0
    }

    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 0-based month.
    pub fn month(self) -> u32 {
        self.0.month0()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// True when both instants fall on the same calendar date, regardless of time of day.
    pub fn is_same_day(self, other: DateTime) -> bool {
        self.date() == other.date()
    }

    /// Stable `YYYY-MM-DD` key for grouping.
    pub fn date_key(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl TryFrom<String> for DateTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateTime> for String {
    fn from(dt: DateTime) -> Self {
        dt.0.format(DATETIME_FORMAT).to_string()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATETIME_FORMAT))
    }
}
