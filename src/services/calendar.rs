// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar grid generation.
//!
//! The grid always has 42 cells starting on the Sunday on or before the 1st,
//! so it covers the whole month plus padding from the adjacent months.

use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::models::{Activity, Calendar, CalendarDay, DateTime, ValidationError, GRID_DAYS};

/// Build the grid for a 0-based `month` and overlay `activities` on their start dates.
///
/// `today` is compared by calendar date only. Months outside `0..=11` are
/// rejected; normalize them with `MonthCursor` first.
pub fn build_calendar(
    year: i32,
    month: u32,
    activities: &[Activity],
    today: DateTime,
) -> Result<Calendar, ValidationError> {
    let first = DateTime::from_ymd(year, month, 1)?.date();
    let leading = first.weekday().num_days_from_sunday();
    let start = first - chrono::Duration::days(i64::from(leading));

    let mut by_date: HashMap<NaiveDate, Vec<Activity>> = HashMap::new();
    for activity in activities {
        by_date
            .entry(activity.start_time.date())
            .or_default()
            .push(activity.clone());
    }

    let today = today.date();
    let days: Vec<CalendarDay> = start
        .iter_days()
        .take(GRID_DAYS)
        .map(|date| CalendarDay {
            date: DateTime::from_naive(date.and_time(NaiveTime::MIN)),
            activities: by_date.get(&date).cloned().unwrap_or_default(),
            is_current_month: date.year() == year && date.month0() == month,
            is_today: date == today,
        })
        .collect();

    tracing::debug!(
        year,
        month,
        leading_days = leading,
        activities = activities.len(),
        "Built calendar grid"
    );

    Ok(Calendar { year, month, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityId, Calories, Distance, Duration, SportType};
    use crate::time_utils::days_in_month;
    use chrono::Weekday;

    fn today() -> DateTime {
        DateTime::from_ymd(2024, 5, 15).unwrap()
    }

    fn activity_at(id: &str, start: &str) -> Activity {
        Activity {
            id: ActivityId::new(id).unwrap(),
            name: id.to_string(),
            sport_type: SportType::from_code(100),
            start_time: DateTime::parse(start).unwrap(),
            duration: Duration::from_minutes(30.0).unwrap(),
            distance: Distance::from_kilometers(5.0).unwrap(),
            calories: Calories::new(300.0).unwrap(),
            device: None,
            avg_heart_rate: None,
            avg_speed: None,
        }
    }

    #[test]
    fn test_every_month_has_42_sunday_aligned_days() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let cal = build_calendar(year, month, &[], today()).unwrap();
                assert_eq!(cal.days.len(), GRID_DAYS);
                assert_eq!(cal.days[0].date.weekday(), Weekday::Sun);
                assert_eq!(cal.days[7].date.weekday(), Weekday::Sun);

                let current: Vec<usize> = cal
                    .days
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| d.is_current_month)
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(current.len() as u32, days_in_month(year, month));
                // contiguous run starting at the 1st
                assert!(current.windows(2).all(|w| w[1] == w[0] + 1));
                assert_eq!(cal.days[current[0]].date.day(), 1);

                assert!(cal
                    .days
                    .windows(2)
                    .all(|w| w[0].date.date().succ_opt() == Some(w[1].date.date())));
            }
        }
    }

    #[test]
    fn test_leap_february() {
        let leap = build_calendar(2024, 1, &[], today()).unwrap();
        assert_eq!(leap.current_month_days().count(), 29);
        let common = build_calendar(2023, 1, &[], today()).unwrap();
        assert_eq!(common.current_month_days().count(), 28);
    }

    #[test]
    fn test_december_rolls_into_january() {
        let cal = build_calendar(2024, 11, &[], today()).unwrap();
        let last = cal.days.last().unwrap();
        assert_eq!((last.date.year(), last.date.month()), (2025, 0));
        assert!(!last.is_current_month);
        // 2024-12-01 is a Sunday: no leading days
        assert!(cal.days[0].is_current_month);
        assert_eq!(cal.days[31].date.day(), 1);
    }

    #[test]
    fn test_january_leads_with_december() {
        let cal = build_calendar(2024, 0, &[], today()).unwrap();
        // 2024-01-01 is a Monday: one leading day, 2023-12-31
        let first = &cal.days[0];
        assert_eq!(
            (first.date.year(), first.date.month(), first.date.day()),
            (2023, 11, 31)
        );
        assert!(!first.is_current_month);
        assert!(cal.days[1].is_current_month);
    }

    #[test]
    fn test_is_today_matches_by_date() {
        let now = DateTime::parse("2024-06-15T18:45:00").unwrap();
        let cal = build_calendar(2024, 5, &[], now).unwrap();
        let today = cal.today().unwrap();
        assert_eq!(today.date.day(), 15);
        assert_eq!(cal.days.iter().filter(|d| d.is_today).count(), 1);

        let other = build_calendar(2024, 3, &[], now).unwrap();
        assert!(other.today().is_none());
    }

    #[test]
    fn test_overlay_by_calendar_date() {
        let activities = vec![
            activity_at("a", "2024-06-03T06:00:00"),
            activity_at("b", "2024-06-03T21:30:00"),
            activity_at("c", "2024-06-04T00:00:01"),
            // trailing day shown in the grid
            activity_at("d", "2024-07-01T08:00:00"),
            // outside the grid entirely
            activity_at("e", "2024-09-01T08:00:00"),
        ];
        let cal = build_calendar(2024, 5, &activities, today()).unwrap();

        let on = |m: u32, d: u32| {
            cal.days
                .iter()
                .find(|day| day.date.month() == m && day.date.day() == d)
                .unwrap()
        };
        assert_eq!(on(5, 3).activities.len(), 2);
        assert_eq!(on(5, 4).activities.len(), 1);
        assert_eq!(on(6, 1).activities[0].id.as_str(), "d");
        let placed: usize = cal.days.iter().map(|d| d.activities.len()).sum();
        assert_eq!(placed, 4);
    }

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(build_calendar(2024, 12, &[], today()).is_err());
    }
}
