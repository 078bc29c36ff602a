// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Statistics aggregates derived from a month's activities.
//!
//! None of these are persisted; they are recomputed from the activity list
//! whenever a view asks for them.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, Calories, Distance, Duration, Pace, SportType};

/// Totals across every activity in a period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct MonthlyStats {
    pub total_activities: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_distance: Distance,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration: Duration,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories: Calories,
    /// Distinct calendar dates with at least one activity
    pub active_days: usize,
}

/// Per-sport breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportStats {
    pub sport: SportType,
    pub count: usize,
    pub total_distance: Distance,
    pub total_duration: Duration,
    pub total_calories: Calories,
    pub average_distance: Distance,
    pub average_duration: Duration,
    pub average_calories: Calories,
    /// Only for sports where some distance was covered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_pace: Option<Pace>,
}

/// Period-wide averages.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Averages {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub average_distance: Distance,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub average_duration: Duration,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub average_calories: Calories,
    pub average_activities_per_day: f64,
}

/// Tone of an insight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum InsightPolarity {
    Positive,
    Neutral,
    Negative,
}

/// A short qualitative observation about a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Insight {
    pub message: String,
    pub polarity: InsightPolarity,
}

impl Insight {
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            polarity: InsightPolarity::Positive,
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            polarity: InsightPolarity::Neutral,
        }
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            polarity: InsightPolarity::Negative,
        }
    }
}

/// Period an insight refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum StatsPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl StatsPeriod {
    pub fn label(self) -> &'static str {
        match self {
            StatsPeriod::Week => "this week",
            StatsPeriod::Month => "this month",
            StatsPeriod::Year => "this year",
        }
    }
}

/// Standout facts for a period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Highlights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_activity: Option<Activity>,
    /// English weekday name, e.g. "Saturday"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active_weekday: Option<String>,
}

/// Everything the statistics panel shows for a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub monthly_stats: MonthlyStats,
    pub sport_stats: Vec<SportStats>,
    pub insights: Vec<Insight>,
    pub averages: Averages,
    pub highlights: Highlights,
}
