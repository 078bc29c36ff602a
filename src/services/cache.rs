// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly activity cache.
//!
//! Gates every month-level fetch from the remote source:
//! 1. The current month is always fetched fresh and never stored
//! 2. Other months are served from the store while younger than the TTL
//! 3. Expired or malformed entries are deleted and refetched
//! 4. Every successful store trims the namespace to `max_entries`,
//!    dropping the chronologically oldest month keys first
//!
//! Two concurrent loads of the same uncached month may both fetch; the
//! second store simply overwrites the first.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::error::AppError;
use crate::models::{Activity, DateTime};
use crate::services::activity_source::ActivitySource;
use crate::services::clock::Clock;
use crate::services::navigation::MonthCursor;
use crate::time_utils::epoch_millis;

/// 30 days.
pub const DEFAULT_TTL_MS: i64 = 2_592_000_000;
pub const DEFAULT_MAX_ENTRIES: usize = 50;
pub const DEFAULT_KEY_PREFIX: &str = "activity_cache_";
/// Bumped when the stored entry layout changes.
pub const CACHE_VERSION: u32 = 1;

/// Cache tuning.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub key_prefix: String,
    pub ttl: chrono::Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl: chrono::Duration::milliseconds(DEFAULT_TTL_MS),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Stored record for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub month_key: String,
    pub activities: Vec<Activity>,
    /// Epoch milliseconds at store time
    pub timestamp: i64,
    pub version: u32,
}

/// Outcome of reading one month from the store.
#[derive(Debug)]
pub enum CacheLookup {
    Hit(CacheEntry),
    Miss,
    Expired { age_ms: i64 },
    Corrupt(String),
}

/// Result of loading a month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthLoad {
    pub activities: Vec<Activity>,
    pub was_cached: bool,
}

/// Snapshot of the cache namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub oldest_key: Option<String>,
    pub newest_key: Option<String>,
}

/// Month-keyed cache in front of an [`ActivitySource`].
#[derive(Clone)]
pub struct MonthlyActivityCache {
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn ActivitySource>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
}

impl MonthlyActivityCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn ActivitySource>,
        clock: Arc<dyn Clock>,
        config: CacheConfig,
    ) -> Self {
        Self {
            store,
            source,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Store key for a month: `<prefix>YYYY-MM`.
    pub fn storage_key(&self, month: MonthCursor) -> String {
        format!("{}{}", self.config.key_prefix, month.month_key())
    }

    fn is_current_month(&self, month: MonthCursor) -> bool {
        month == MonthCursor::containing(DateTime::from_naive(self.clock.now()))
    }

    /// Load a month's activities, from the store when allowed and fresh.
    pub async fn load_month(&self, month: MonthCursor) -> Result<MonthLoad, AppError> {
        let month_key = month.month_key();

        if self.is_current_month(month) {
            tracing::debug!(month_key = %month_key, "Current month, bypassing cache");
            let activities = self
                .source
                .fetch_activities(month.year(), month.month())
                .await?;
            return Ok(MonthLoad {
                activities,
                was_cached: false,
            });
        }

        let key = self.storage_key(month);
        match self.lookup(&key).await {
            CacheLookup::Hit(entry) => {
                tracing::debug!(
                    month_key = %month_key,
                    count = entry.activities.len(),
                    "Cache hit"
                );
                return Ok(MonthLoad {
                    activities: entry.activities,
                    was_cached: true,
                });
            }
            CacheLookup::Miss => {
                tracing::debug!(month_key = %month_key, "Cache miss");
            }
            CacheLookup::Expired { age_ms } => {
                tracing::info!(month_key = %month_key, age_ms, "Cache entry expired");
                self.discard(&key).await;
            }
            CacheLookup::Corrupt(reason) => {
                tracing::warn!(
                    month_key = %month_key,
                    reason = %reason,
                    "Discarding corrupt cache entry"
                );
                self.discard(&key).await;
            }
        }

        let activities = self
            .source
            .fetch_activities(month.year(), month.month())
            .await
            .inspect_err(|e| {
                tracing::warn!(month_key = %month_key, error = %e, "Remote fetch failed");
            })?;

        self.store_month(&key, month_key, &activities).await;

        Ok(MonthLoad {
            activities,
            was_cached: false,
        })
    }

    /// Classify the stored record under `key`. Never mutates the store.
    pub async fn lookup(&self, key: &str) -> CacheLookup {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed, treating as miss");
                return CacheLookup::Miss;
            }
        };

        if !raw.get("activities").is_some_and(Value::is_array) {
            return CacheLookup::Corrupt("activities is not an array".to_string());
        }

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => return CacheLookup::Corrupt(e.to_string()),
        };

        if entry.version != CACHE_VERSION {
            return CacheLookup::Corrupt(format!("unsupported version {}", entry.version));
        }

        let age_ms = epoch_millis(self.clock.now()) - entry.timestamp;
        if age_ms > self.config.ttl.num_milliseconds() {
            return CacheLookup::Expired { age_ms };
        }

        CacheLookup::Hit(entry)
    }

    async fn discard(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            tracing::warn!(key, error = %e, "Failed to delete cache entry");
        }
    }

    /// Write a month and trim the namespace. Storage failures are logged, not raised:
    /// the caller already has the fetched activities.
    async fn store_month(&self, key: &str, month_key: String, activities: &[Activity]) {
        let entry = CacheEntry {
            month_key,
            activities: activities.to_vec(),
            timestamp: epoch_millis(self.clock.now()),
            version: CACHE_VERSION,
        };

        let value = match serde_json::to_value(&entry) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.store.set(key, value, Some(self.config.ttl)).await {
            tracing::warn!(key, error = %e, "Failed to store cache entry");
            return;
        }

        tracing::debug!(key, count = activities.len(), "Cached month");

        if let Err(e) = self.evict_surplus().await {
            tracing::warn!(error = %e, "Cache eviction failed");
        }
    }

    /// Month keys under this cache's prefix, oldest first.
    async fn cached_keys(&self) -> Result<Vec<String>, AppError> {
        let mut keys: Vec<String> = self
            .store
            .list_keys()
            .await?
            .into_iter()
            .filter(|k| k.starts_with(&self.config.key_prefix))
            .collect();
        // "YYYY-MM" sorts chronologically
        keys.sort();
        Ok(keys)
    }

    /// Remove the oldest entries until at most `max_entries` remain.
    async fn evict_surplus(&self) -> Result<usize, AppError> {
        let keys = self.cached_keys().await?;
        let surplus = keys.len().saturating_sub(self.config.max_entries);

        for key in keys.iter().take(surplus) {
            self.store.remove(key).await?;
        }

        if surplus > 0 {
            tracing::info!(
                evicted = surplus,
                max_entries = self.config.max_entries,
                "Evicted oldest cached months"
            );
        }
        Ok(surplus)
    }

    /// Drop one month from the store.
    pub async fn invalidate(&self, month: MonthCursor) -> Result<bool, AppError> {
        let removed = self.store.remove(&self.storage_key(month)).await?;
        tracing::info!(month_key = %month.month_key(), removed, "Invalidated cached month");
        Ok(removed)
    }

    /// Drop every month under this cache's prefix, leaving other keys alone.
    pub async fn clear(&self) -> Result<usize, AppError> {
        let keys = self.cached_keys().await?;
        for key in &keys {
            self.store.remove(key).await?;
        }
        tracing::info!(removed = keys.len(), "Cleared activity cache");
        Ok(keys.len())
    }

    pub async fn stats(&self) -> Result<CacheStats, AppError> {
        let keys = self.cached_keys().await?;
        let strip = |k: &String| k[self.config.key_prefix.len()..].to_string();
        Ok(CacheStats {
            entries: keys.len(),
            max_entries: self.config.max_entries,
            oldest_key: keys.first().map(strip),
            newest_key: keys.last().map(strip),
        })
    }
}
