// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity Calendar: monthly calendar and statistics for fitness activities
//!
//! This crate turns monthly activity lists from a remote fitness API into
//! a 42-day calendar grid, per-sport statistics and insights, with a
//! month-keyed cache in front of the API.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::ActivityService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub activity_service: ActivityService,
}
