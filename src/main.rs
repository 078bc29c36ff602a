// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Calendar API Server
//!
//! Serves calendar grids and monthly statistics built from a remote
//! fitness activity API, caching past months locally.

use activity_calendar::{
    config::Config,
    db::MemoryStore,
    services::{ActivityService, HttpActivitySource, MonthlyActivityCache, SystemClock},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Activity Calendar API");

    if config.activity_api_token.is_none() {
        tracing::warn!("ACTIVITY_API_TOKEN not set; remote fetches will fail as unauthenticated");
    }

    let clock = Arc::new(SystemClock);
    let store = Arc::new(MemoryStore::new(clock.clone()));
    let source = Arc::new(HttpActivitySource::new(
        config.activity_api_base_url.clone(),
        config.activity_api_token.clone(),
    )?);

    let cache_config = config.cache_config();
    tracing::info!(
        prefix = %cache_config.key_prefix,
        max_entries = cache_config.max_entries,
        ttl_days = cache_config.ttl.num_days(),
        "Monthly activity cache initialized"
    );
    let cache = MonthlyActivityCache::new(store, source, clock.clone(), cache_config);
    let activity_service = ActivityService::new(cache, clock);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        activity_service,
    });

    // Build router
    let app = activity_calendar::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activity_calendar=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
