// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived statistics and insights.

use chrono::Weekday;
use std::collections::HashMap;

use crate::models::{
    Activity, Averages, Calories, Distance, Duration, Highlights, Insight, Pace, SportStats,
    Statistics, StatsPeriod,
};
use crate::services::aggregation::{calculate_monthly_totals, group_by_sport};

const CONSISTENCY_GREAT_DAYS: usize = 20;
const CONSISTENCY_GOOD_DAYS: usize = 10;
const DISTANCE_GREAT_KM: f64 = 100.0;
const DISTANCE_GOOD_KM: f64 = 50.0;
const VARIETY_GREAT_SPORTS: usize = 3;
const VARIETY_GOOD_SPORTS: usize = 2;

/// Per-sport stats, most frequent sport first; ties keep encounter order.
pub fn calculate_sport_stats(activities: &[Activity]) -> Vec<SportStats> {
    let mut stats: Vec<SportStats> = group_by_sport(activities)
        .into_iter()
        .map(|group| {
            let count = group.activities.len();
            let total_distance: Distance = group.activities.iter().map(|a| a.distance).sum();
            let total_duration: Duration = group.activities.iter().map(|a| a.duration).sum();
            let total_calories: Calories = group.activities.iter().map(|a| a.calories).sum();

            SportStats {
                sport: group.sport,
                count,
                total_distance,
                total_duration,
                total_calories,
                average_distance: total_distance.average_over(count),
                average_duration: total_duration.average_over(count),
                average_calories: total_calories.average_over(count),
                average_pace: Pace::from_duration_and_distance(total_duration, total_distance),
            }
        })
        .collect();

    // sort_by is stable
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Period averages; every denominator is clamped to at least one.
pub fn calculate_averages(activities: &[Activity]) -> Averages {
    let totals = calculate_monthly_totals(activities);
    let count = totals.total_activities;

    Averages {
        average_distance: totals.total_distance.average_over(count),
        average_duration: totals.total_duration.average_over(count),
        average_calories: totals.total_calories.average_over(count),
        average_activities_per_day: count as f64 / totals.active_days.max(1) as f64,
    }
}

/// Qualitative observations on consistency, distance and variety.
pub fn calculate_insights(activities: &[Activity], period: StatsPeriod) -> Vec<Insight> {
    let totals = calculate_monthly_totals(activities);
    let when = period.label();

    if totals.total_activities == 0 {
        return vec![Insight::neutral(format!("No activities found {}.", when))];
    }

    let mut insights = Vec::new();

    let days = totals.active_days;
    if days >= CONSISTENCY_GREAT_DAYS {
        insights.push(Insight::positive(format!(
            "Great consistency! You were active on {} days {}.",
            days, when
        )));
    } else if days >= CONSISTENCY_GOOD_DAYS {
        insights.push(Insight::positive(format!(
            "Good activity level with {} active days {}.",
            days, when
        )));
    } else {
        insights.push(Insight::negative(format!(
            "Try to be more active: only {} active days {}.",
            days, when
        )));
    }

    let km = totals.total_distance.kilometers();
    if km >= DISTANCE_GREAT_KM {
        insights.push(Insight::positive(format!(
            "Impressive distance: {:.1} km covered {}!",
            km, when
        )));
    } else if km >= DISTANCE_GOOD_KM {
        insights.push(Insight::positive(format!(
            "Solid distance: {:.1} km covered {}.",
            km, when
        )));
    }

    let sports = group_by_sport(activities).len();
    if sports >= VARIETY_GREAT_SPORTS {
        insights.push(Insight::positive(format!(
            "Great variety with {} different sports.",
            sports
        )));
    } else if sports == VARIETY_GOOD_SPORTS {
        insights.push(Insight::positive("Good variety with 2 different sports."));
    } else {
        insights.push(Insight::neutral("Try adding more variety to your training."));
    }

    insights
}

/// The activity with the longest duration; the earliest one wins a tie.
pub fn longest_activity(activities: &[Activity]) -> Option<&Activity> {
    activities.iter().fold(None, |best: Option<&Activity>, a| match best {
        Some(b) if b.duration >= a.duration => Some(b),
        _ => Some(a),
    })
}

/// Weekday with the most activities; ties go to the earlier day in a Sunday-first week.
pub fn most_active_weekday(activities: &[Activity]) -> Option<Weekday> {
    let mut counts: HashMap<Weekday, usize> = HashMap::new();
    for activity in activities {
        *counts.entry(activity.start_time.weekday()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(day_a, count_a), (day_b, count_b)| {
            count_a.cmp(count_b).then_with(|| {
                day_b
                    .num_days_from_sunday()
                    .cmp(&day_a.num_days_from_sunday())
            })
        })
        .map(|(day, _)| day)
}

/// Everything the statistics view needs for one period.
pub fn compute_statistics(activities: &[Activity], period: StatsPeriod) -> Statistics {
    Statistics {
        monthly_stats: calculate_monthly_totals(activities),
        sport_stats: calculate_sport_stats(activities),
        insights: calculate_insights(activities, period),
        averages: calculate_averages(activities),
        highlights: Highlights {
            longest_activity: longest_activity(activities).cloned(),
            most_active_weekday: most_active_weekday(activities).map(weekday_name),
        },
    }
}

fn weekday_name(day: Weekday) -> String {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
    .to_string()
}
