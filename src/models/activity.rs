// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model: one recorded sport session.

use serde::{Deserialize, Serialize};

use crate::models::{ActivityId, Calories, DateTime, Distance, Duration, Pace, SportType};

/// A single sport session.
///
/// Built once from an API record or a cache entry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Activity name/title
    pub name: String,
    pub sport_type: SportType,
    /// Local start time
    pub start_time: DateTime,
    pub duration: Duration,
    pub distance: Distance,
    pub calories: Calories,
    /// Recording device (e.g. "PACE 3")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Average heart rate in bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<u32>,
    /// Average speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_speed: Option<f64>,
}

impl Activity {
    /// Pace over the whole session; `None` for activities without distance.
    pub fn pace(&self) -> Option<Pace> {
        Pace::from_duration_and_distance(self.duration, self.distance)
    }

    pub fn has_distance(&self) -> bool {
        !self.distance.is_zero()
    }

    /// True if the activity started on the same calendar date as `date`.
    pub fn is_on(&self, date: DateTime) -> bool {
        self.start_time.is_same_day(date)
    }

    pub fn is_same_day(&self, other: &Activity) -> bool {
        self.start_time.is_same_day(other.start_time)
    }

    pub fn is_same_sport(&self, other: &Activity) -> bool {
        self.sport_type.code == other.sport_type.code
    }
}
