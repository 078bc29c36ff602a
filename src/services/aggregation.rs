// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grouping and totals over a list of activities.
//!
//! Nothing here fails: empty input produces empty groups and zeroed totals.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Activity, MonthlyStats, SportType};

/// Activities sharing one sport code, in encounter order.
#[derive(Debug, Clone)]
pub struct SportGroup<'a> {
    pub sport: SportType,
    pub activities: Vec<&'a Activity>,
}

/// Group activities by local calendar date, ordered by date.
pub fn group_by_date(activities: &[Activity]) -> BTreeMap<NaiveDate, Vec<&Activity>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        groups
            .entry(activity.start_time.date())
            .or_default()
            .push(activity);
    }
    groups
}

/// Group activities by sport code.
///
/// Groups appear in the order their first activity was encountered. Sport
/// instances are matched on `code` through an index, so independently built
/// `SportType` values for the same code land in one group.
pub fn group_by_sport(activities: &[Activity]) -> Vec<SportGroup<'_>> {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut groups: Vec<SportGroup<'_>> = Vec::new();

    for activity in activities {
        let code = activity.sport_type.code;
        match index.get(&code) {
            Some(&slot) => groups[slot].activities.push(activity),
            None => {
                index.insert(code, groups.len());
                groups.push(SportGroup {
                    sport: activity.sport_type.clone(),
                    activities: vec![activity],
                });
            }
        }
    }

    groups
}

/// Sum every magnitude and count distinct active dates.
pub fn calculate_monthly_totals(activities: &[Activity]) -> MonthlyStats {
    MonthlyStats {
        total_activities: activities.len(),
        total_distance: activities.iter().map(|a| a.distance).sum(),
        total_duration: activities.iter().map(|a| a.duration).sum(),
        total_calories: activities.iter().map(|a| a.calories).sum(),
        active_days: get_active_days(activities),
    }
}

/// Number of distinct calendar dates with at least one activity.
pub fn get_active_days(activities: &[Activity]) -> usize {
    activities
        .iter()
        .map(|a| a.start_time.date())
        .collect::<HashSet<_>>()
        .len()
}
