// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_calendar::config::Config;
use activity_calendar::db::MemoryStore;
use activity_calendar::error::AppError;
use activity_calendar::models::{
    Activity, ActivityId, Calories, DateTime, Distance, Duration, SportType,
};
use activity_calendar::routes::create_router;
use activity_calendar::services::{
    ActivityService, ActivitySource, CacheConfig, FixedClock, MonthlyActivityCache,
};
use activity_calendar::AppState;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fixed "now" used by every test: 2024-06-15 12:00 local.
#[allow(dead_code)]
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Build a valid activity.
#[allow(dead_code)]
pub fn activity(id: &str, code: i32, start: &str, km: f64, minutes: f64) -> Activity {
    Activity {
        id: ActivityId::new(id).unwrap(),
        name: format!("Activity {}", id),
        sport_type: SportType::from_code(code),
        start_time: DateTime::parse(start).unwrap(),
        duration: Duration::from_minutes(minutes).unwrap(),
        distance: Distance::from_kilometers(km).unwrap(),
        calories: Calories::new(minutes * 10.0).unwrap(),
        device: Some("Test Watch".to_string()),
        avg_heart_rate: Some(140),
        avg_speed: None,
    }
}

/// How the scripted source should fail.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Unauthenticated,
    Api,
}

/// In-memory activity source that records every call.
#[derive(Default)]
pub struct ScriptedSource {
    months: DashMap<(i32, u32), Vec<Activity>>,
    calls: AtomicUsize,
    failure: Mutex<Option<Failure>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn with_month(self, year: i32, month: u32, activities: Vec<Activity>) -> Self {
        self.months.insert((year, month), activities);
        self
    }

    pub fn set_month(&self, year: i32, month: u32, activities: Vec<Activity>) {
        self.months.insert((year, month), activities);
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        *self.failure.lock().unwrap() = failure;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivitySource for ScriptedSource {
    async fn fetch_activities(&self, year: i32, month: u32) -> Result<Vec<Activity>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.failure.lock().unwrap() {
            Some(Failure::Unauthenticated) => return Err(AppError::Authentication),
            Some(Failure::Api) => return Err(AppError::Api("HTTP 500: boom".to_string())),
            None => {}
        }
        Ok(self
            .months
            .get(&(year, month))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

/// Cache wired to in-memory collaborators, with handles to each of them.
#[allow(dead_code)]
pub struct Harness {
    pub clock: Arc<FixedClock>,
    pub store: Arc<MemoryStore>,
    pub source: Arc<ScriptedSource>,
    pub cache: MonthlyActivityCache,
}

#[allow(dead_code)]
pub fn harness(source: ScriptedSource, config: CacheConfig) -> Harness {
    let clock = Arc::new(FixedClock::new(test_now()));
    let store = Arc::new(MemoryStore::new(clock.clone()));
    let source = Arc::new(source);
    let cache = MonthlyActivityCache::new(store.clone(), source.clone(), clock.clone(), config);
    Harness {
        clock,
        store,
        source,
        cache,
    }
}

/// Create a test app backed by a scripted source.
/// Returns the router, the shared state and the harness handles.
#[allow(dead_code)]
pub fn create_test_app(source: ScriptedSource) -> (axum::Router, Arc<AppState>, Harness) {
    let config = Config::test_default();
    let harness = harness(source, config.cache_config());
    let activity_service = ActivityService::new(harness.cache.clone(), harness.clock.clone());

    let state = Arc::new(AppState {
        config,
        activity_service,
    });

    (create_router(state.clone()), state, harness)
}
