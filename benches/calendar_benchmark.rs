use activity_calendar::models::{
    Activity, ActivityId, Calories, DateTime, Distance, Duration, SportType, StatsPeriod,
};
use activity_calendar::services::build_calendar;
use activity_calendar::services::statistics::compute_statistics;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SPORT_CODES: [i32; 5] = [100, 101, 200, 300, 402];

/// A busy month: a few activities every day of March 2024.
fn busy_month() -> Vec<Activity> {
    (0..93)
        .map(|i| {
            let day = (i % 31) as u32 + 1;
            let hour = 6 + (i / 31) as u32 * 5;
            Activity {
                id: ActivityId::new(format!("bench-{}", i)).expect("valid id"),
                name: format!("Session {}", i),
                sport_type: SportType::from_code(SPORT_CODES[i % SPORT_CODES.len()]),
                start_time: DateTime::from_ymd_hms(2024, 2, day, hour, 0, 0).expect("valid date"),
                duration: Duration::from_minutes(30.0 + (i % 7) as f64 * 10.0)
                    .expect("valid duration"),
                distance: Distance::from_kilometers((i % 11) as f64 * 2.5).expect("valid distance"),
                calories: Calories::new(250.0 + i as f64).expect("valid calories"),
                device: None,
                avg_heart_rate: Some(135),
                avg_speed: None,
            }
        })
        .collect()
}

fn benchmark_month_views(c: &mut Criterion) {
    let activities = busy_month();
    let today = DateTime::from_ymd(2024, 2, 15).expect("valid date");

    let mut group = c.benchmark_group("month_views");

    group.bench_function("build_calendar", |b| {
        b.iter(|| build_calendar(2024, 2, black_box(&activities), today))
    });

    group.bench_function("compute_statistics", |b| {
        b.iter(|| compute_statistics(black_box(&activities), StatsPeriod::Month))
    });

    group.finish();
}

criterion_group!(benches, benchmark_month_views);
criterion_main!(benches);
