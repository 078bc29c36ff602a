// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calendar grid view model.

use serde::Serialize;

use crate::models::{Activity, DateTime};

/// Number of cells in the grid (6 weeks of 7 days).
pub const GRID_DAYS: usize = 42;

/// One cell of the calendar grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: DateTime,
    /// Activities that started on this date
    pub activities: Vec<Activity>,
    /// False for leading/trailing days from adjacent months
    pub is_current_month: bool,
    pub is_today: bool,
}

impl CalendarDay {
    pub fn has_activities(&self) -> bool {
        !self.activities.is_empty()
    }
}

/// A 6×7 month grid starting on the Sunday on or before the 1st.
#[derive(Debug, Clone, Serialize)]
pub struct Calendar {
    pub year: i32,
    /// 0-based month
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl Calendar {
    /// Grid rows, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    /// Cells belonging to the displayed month.
    pub fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.is_current_month)
    }

    pub fn today(&self) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.is_today)
    }
}
