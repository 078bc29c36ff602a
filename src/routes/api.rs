// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar, statistics and cache routes.

use crate::error::{AppError, Result};
use crate::models::{Statistics, StatsPeriod};
use crate::services::{CacheStats, CalendarView, MonthCursor, MonthOverview};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calendar", get(get_calendar))
        .route("/api/stats", get(get_stats))
        .route("/api/overview", get(get_overview))
        .route("/api/cache", get(get_cache_stats).delete(clear_cache))
        .route("/api/cache/{year}/{month}", delete(invalidate_month))
}

/// Month selection. `month` is 0-based and may overflow in either direction
/// (`-1` is December of the previous year); both default to the current month.
#[derive(Deserialize)]
struct MonthQuery {
    year: Option<i32>,
    month: Option<i32>,
    #[serde(default)]
    period: StatsPeriod,
}

fn check_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::BadRequest(format!(
            "year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

fn resolve_month(state: &AppState, query: &MonthQuery) -> Result<MonthCursor> {
    let current = state.activity_service.current_month();
    let year = query.year.unwrap_or(current.year());
    check_year(year)?;

    // Month overflow can still carry the year out of range.
    let cursor = MonthCursor::new(year, query.month.unwrap_or(current.month() as i32));
    check_year(cursor.year())?;
    Ok(cursor)
}

// ─── Calendar ────────────────────────────────────────────────

async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarView>> {
    let month = resolve_month(&state, &query)?;
    let view = state.activity_service.render_calendar(month).await?;
    Ok(Json(view))
}

// ─── Statistics ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub month_key: String,
    pub was_cached: bool,
    pub period: StatsPeriod,
    pub statistics: Statistics,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<StatsResponse>> {
    let month = resolve_month(&state, &query)?;
    let load = state.activity_service.cache().load_month(month).await?;
    let statistics = state
        .activity_service
        .compute_statistics(&load.activities, query.period);

    Ok(Json(StatsResponse {
        month_key: month.month_key(),
        was_cached: load.was_cached,
        period: query.period,
        statistics,
    }))
}

async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthOverview>> {
    let month = resolve_month(&state, &query)?;
    let overview = state.activity_service.month_overview(month).await?;
    Ok(Json(overview))
}

// ─── Cache maintenance ───────────────────────────────────────

#[derive(Serialize)]
pub struct CacheClearResponse {
    pub removed: usize,
}

async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Result<Json<CacheStats>> {
    Ok(Json(state.activity_service.cache().stats().await?))
}

async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<Json<CacheClearResponse>> {
    let removed = state.activity_service.cache().clear().await?;
    Ok(Json(CacheClearResponse { removed }))
}

#[derive(Serialize)]
pub struct InvalidateResponse {
    pub month_key: String,
    pub removed: bool,
}

async fn invalidate_month(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<InvalidateResponse>> {
    let cursor = MonthCursor::from_parts(year, month)?;
    let removed = state.activity_service.cache().invalidate(cursor).await?;
    Ok(Json(InvalidateResponse {
        month_key: cursor.month_key(),
        removed,
    }))
}
