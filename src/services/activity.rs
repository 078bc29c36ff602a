// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity use cases.
//!
//! Wires the cache, calendar builder and statistics together:
//! 1. Load a month (through the monthly cache)
//! 2. Build the 42-day grid with activities overlaid
//! 3. Compute statistics and insights for the same activity list

use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Activity, Calendar, DateTime, Statistics, StatsPeriod};
use crate::services::cache::{MonthLoad, MonthlyActivityCache};
use crate::services::calendar::build_calendar;
use crate::services::clock::Clock;
use crate::services::navigation::MonthCursor;
use crate::services::statistics;

/// Upper bound on months fetched in parallel by `load_months`.
const MAX_CONCURRENT_MONTH_LOADS: usize = 4;

/// A rendered month grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub month_key: String,
    pub was_cached: bool,
    pub calendar: Calendar,
}

/// Grid plus statistics for one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthOverview {
    pub month_key: String,
    pub was_cached: bool,
    pub calendar: Calendar,
    pub statistics: Statistics,
}

/// Entry point for the presentation layer.
#[derive(Clone)]
pub struct ActivityService {
    cache: MonthlyActivityCache,
    clock: Arc<dyn Clock>,
}

impl ActivityService {
    pub fn new(cache: MonthlyActivityCache, clock: Arc<dyn Clock>) -> Self {
        Self { cache, clock }
    }

    pub fn cache(&self) -> &MonthlyActivityCache {
        &self.cache
    }

    pub fn today(&self) -> DateTime {
        DateTime::from_naive(self.clock.now())
    }

    pub fn current_month(&self) -> MonthCursor {
        MonthCursor::containing(self.today())
    }

    /// Load the activities for a 0-based month.
    pub async fn load_month(&self, year: i32, month: u32) -> Result<MonthLoad> {
        let cursor = MonthCursor::from_parts(year, month)?;
        self.cache.load_month(cursor).await
    }

    /// Load several months with bounded concurrency, returned in request order.
    pub async fn load_months(&self, months: &[MonthCursor]) -> Result<Vec<MonthLoad>> {
        stream::iter(months.iter().copied())
            .map(|month| self.cache.load_month(month))
            .buffered(MAX_CONCURRENT_MONTH_LOADS)
            .try_collect()
            .await
    }

    /// Load a month and lay it out as a calendar grid.
    pub async fn render_calendar(&self, month: MonthCursor) -> Result<CalendarView> {
        let load = self.cache.load_month(month).await?;
        let calendar = build_calendar(month.year(), month.month(), &load.activities, self.today())?;

        Ok(CalendarView {
            month_key: month.month_key(),
            was_cached: load.was_cached,
            calendar,
        })
    }

    /// Statistics for an already loaded activity list.
    pub fn compute_statistics(&self, activities: &[Activity], period: StatsPeriod) -> Statistics {
        statistics::compute_statistics(activities, period)
    }

    /// Load a month once and derive both the grid and its statistics.
    pub async fn month_overview(&self, month: MonthCursor) -> Result<MonthOverview> {
        let load = self.cache.load_month(month).await?;
        let calendar = build_calendar(month.year(), month.month(), &load.activities, self.today())?;
        let statistics = self.compute_statistics(&load.activities, StatsPeriod::Month);

        tracing::info!(
            month_key = %month.month_key(),
            activities = load.activities.len(),
            was_cached = load.was_cached,
            "Built month overview"
        );

        Ok(MonthOverview {
            month_key: month.month_key(),
            was_cached: load.was_cached,
            calendar,
            statistics,
        })
    }
}
