//! Generic key-value caching with TTL tiers.
//!
//! Two pieces live here:
//! - [`CacheStore`]: the storage seam. The default [`MemoryCacheStore`]
//!   keeps everything in process memory; a host can plug in its own store
//!   as long as writes of (value, validator, timestamp) stay atomic with
//!   respect to reads.
//! - [`RevalidatingCache`]: a conditional-refresh wrapper over one cache
//!   key. It reads the content tier first (zero I/O on a hit), then falls
//!   back to a long-lived validator tier to drive an ETag-style
//!   conditional fetch.

mod memory;
mod revalidate;

pub use memory::MemoryCacheStore;
pub use revalidate::{ConditionalFetch, FetchOutcome, RevalidateError, RevalidatingCache};

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached value together with its validator token and fetch timestamp.
///
/// The same payload serves both TTL tiers: a short `content` TTL decides
/// whether the value can be returned without any network traffic, a long
/// `validator` TTL decides how long the token stays usable for conditional
/// requests after the content has gone stale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedPayload {
    /// The cached value, stored as JSON so the store stays type-agnostic.
    pub value: serde_json::Value,
    /// Opaque validator token (e.g. an ETag) from the last full fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    /// When the payload was last fetched or revalidated.
    pub fetched_at: DateTime<Utc>,
}

impl CachedPayload {
    /// Create a payload stamped with the current time.
    pub fn new(value: serde_json::Value, validator: Option<String>) -> Self {
        Self {
            value,
            validator,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the payload is younger than `max_age`.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => age <= max_age,
            // A max_age too large for chrono means "effectively forever".
            Err(_) => true,
        }
    }
}

/// TTL pair for the two retrieval tiers of a revalidating key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// How long a payload may be returned without revalidation.
    pub content: Duration,
    /// How long a stale payload and its validator stay usable for
    /// conditional requests.
    pub validator: Duration,
}

impl CacheTtl {
    pub fn new(content: Duration, validator: Duration) -> Self {
        Self { content, validator }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            content: Duration::from_secs(24 * 60 * 60),
            validator: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

/// Storage seam for cached payloads.
///
/// Implementations must make `put` atomic with respect to `get`: a reader
/// observes either the previous payload or the new one, never a torn pair
/// of (value, validator).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the payload under `key` if it is younger than `max_age`.
    async fn get(&self, key: &str, max_age: Duration) -> Option<CachedPayload>;

    /// Install a payload under `key`, replacing any previous one.
    async fn put(&self, key: &str, payload: CachedPayload);

    /// Read just the validator token, subject to `max_age`.
    async fn validator(&self, key: &str, max_age: Duration) -> Option<String> {
        self.get(key, max_age).await.and_then(|p| p.validator)
    }
}
