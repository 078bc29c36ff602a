// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value storage layer.
//!
//! The cache talks to storage only through [`KeyValueStore`], which holds
//! structured JSON records keyed by string.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Minimal structured key-value store contract.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a record, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError>;

    /// Insert or overwrite a record. Stores may use `ttl_hint` to drop the
    /// record on their own once it has aged out.
    async fn set(
        &self,
        key: &str,
        value: Value,
        ttl_hint: Option<chrono::Duration>,
    ) -> Result<(), AppError>;

    /// Delete a record. Returns `true` if something was removed.
    async fn remove(&self, key: &str) -> Result<bool, AppError>;

    /// All live keys, in no particular order.
    async fn list_keys(&self) -> Result<Vec<String>, AppError>;

    /// Delete every record.
    async fn clear(&self) -> Result<(), AppError>;
}
