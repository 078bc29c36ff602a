// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod activity_source;
pub mod aggregation;
pub mod cache;
pub mod calendar;
pub mod clock;
pub mod navigation;
pub mod statistics;

pub use activity::{ActivityService, CalendarView, MonthOverview};
pub use activity_source::{ActivitySource, HttpActivitySource};
pub use cache::{CacheConfig, CacheLookup, CacheStats, MonthLoad, MonthlyActivityCache};
pub use calendar::build_calendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use navigation::MonthCursor;
