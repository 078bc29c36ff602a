// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process key-value store.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::error::AppError;
use crate::services::clock::Clock;

#[derive(Debug, Clone)]
struct StoredValue {
    value: Value,
    expires_at: Option<NaiveDateTime>,
}

impl StoredValue {
    fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// `DashMap`-backed store that honors TTL hints against an injected clock.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, StoredValue>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let now = self.clock.now();
        match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        // Read guard is released here; a concurrent `set` may have replaced the record.
        if self
            .entries
            .remove_if(key, |_, stored| stored.is_expired(now))
            .is_some()
        {
            tracing::debug!(key, "Dropped expired store record");
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: Value,
        ttl_hint: Option<chrono::Duration>,
    ) -> Result<(), AppError> {
        let expires_at = match ttl_hint {
            None => None,
            Some(ttl) => Some(self.clock.now().checked_add_signed(ttl).ok_or_else(|| {
                AppError::Storage(format!("TTL hint for {} out of range", key))
            })?),
        };
        self.entries
            .insert(key.to_string(), StoredValue { value, expires_at });
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>, AppError> {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, stored| !stored.is_expired(now));

        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            tracing::debug!(purged, "Dropped expired store records");
        }
        Ok(self.entries.iter().map(|entry| entry.key().clone()).collect())
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.entries.clear();
        Ok(())
    }
}
