//! In-memory cache store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CachedPayload, CacheStore};

/// Process-local [`CacheStore`] backed by a `RwLock<HashMap>`.
///
/// Payloads survive for the process lifetime only. Expired entries are
/// dropped lazily on read; there is no background sweeper.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CachedPayload>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads, regardless of freshness.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str, max_age: Duration) -> Option<CachedPayload> {
        let entries = self.entries.read().await;
        let payload = entries.get(key)?;
        if payload.is_fresh(max_age) {
            debug!(key = key, "cache hit");
            Some(payload.clone())
        } else {
            None
        }
    }

    async fn put(&self, key: &str, payload: CachedPayload) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), payload);
    }
}
