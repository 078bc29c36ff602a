// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod calendar;
pub mod sport;
pub mod stats;
pub mod values;

pub use activity::Activity;
pub use calendar::{Calendar, CalendarDay, GRID_DAYS};
pub use sport::{SportCategory, SportType};
pub use stats::{
    Averages, Highlights, Insight, InsightPolarity, MonthlyStats, SportStats, Statistics,
    StatsPeriod,
};
pub use values::{ActivityId, Calories, DateTime, Distance, Duration, Pace, ValidationError};
