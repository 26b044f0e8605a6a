//! Conditional-refresh wrapper over a single cache key.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::REVALIDATION_OUTCOMES;

use super::{CachedPayload, CacheStore, CacheTtl};

/// Outcome of a conditional fetch against the remote source.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The source confirmed the payload behind the presented validator is
    /// still current. No body was transferred.
    NotModified,
    /// A full payload, with the validator token to present next time.
    Fresh {
        value: T,
        validator: Option<String>,
    },
}

/// Seam for the remote source behind a revalidating key.
///
/// `fetch(None)` is an unconditional fetch; `fetch(Some(token))` asks the
/// source to answer [`FetchOutcome::NotModified`] when nothing changed
/// since `token` was issued.
#[async_trait]
pub trait ConditionalFetch: Send + Sync {
    type Value: Send;
    type Error: std::error::Error + Send + Sync;

    async fn fetch(
        &self,
        validator: Option<&str>,
    ) -> Result<FetchOutcome<Self::Value>, Self::Error>;
}

/// Errors from [`RevalidatingCache::get`].
#[derive(Debug, thiserror::Error)]
pub enum RevalidateError<E> {
    /// The source failed and no stale payload was available to serve.
    #[error("refresh failed: {0}")]
    Refresh(#[source] E),

    /// A stored payload could not be decoded into the expected type.
    #[error("cached payload could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// The source answered not-modified but nothing is cached. The source
    /// violated the conditional-fetch contract.
    #[error("source reported not-modified without a cached baseline")]
    MissingBaseline,
}

/// Two-tier conditional cache for one key.
///
/// Read policy, in order:
/// 1. Content-tier hit (payload younger than the content TTL): returned
///    as-is, no network traffic.
/// 2. Validator-tier read (payload younger than the long validator TTL):
///    the stale value and its token drive a conditional fetch. On
///    not-modified the stored payload is re-stamped and returned — one
///    request, no body, counted as a hit rather than a miss.
/// 3. Anything else: full fetch; value and validator are installed
///    together in a single store write.
///
/// If the source fails while a validator-tier payload exists, the stale
/// value is served instead of surfacing the error (availability over
/// freshness). An aborted fetch never touches the store.
pub struct RevalidatingCache<T, E> {
    key: String,
    ttl: CacheTtl,
    store: Arc<dyn CacheStore>,
    source: Arc<dyn ConditionalFetch<Value = T, Error = E>>,
}

impl<T, E> RevalidatingCache<T, E>
where
    T: Serialize + DeserializeOwned + Send,
    E: std::error::Error + Send + Sync,
{
    pub fn new(
        key: impl Into<String>,
        ttl: CacheTtl,
        store: Arc<dyn CacheStore>,
        source: Arc<dyn ConditionalFetch<Value = T, Error = E>>,
    ) -> Self {
        Self {
            key: key.into(),
            ttl,
            store,
            source,
        }
    }

    /// The cache key this wrapper owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the current value per the tiered policy above.
    pub async fn get(&self) -> Result<T, RevalidateError<E>> {
        if let Some(hit) = self.store.get(&self.key, self.ttl.content).await {
            self.count("content_hit");
            return Self::decode(hit.value);
        }

        // The validator tier deliberately ignores the content TTL: a stale
        // value plus its token is exactly what a conditional request needs.
        let stale = self.store.get(&self.key, self.ttl.validator).await;
        let validator = stale.as_ref().and_then(|p| p.validator.clone());

        debug!(key = %self.key, conditional = validator.is_some(), "refreshing cached payload");

        let outcome = match self.source.fetch(validator.as_deref()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(stale) = stale {
                    warn!(key = %self.key, error = %e, "refresh failed, serving stale payload");
                    self.count("stale_served");
                    return Self::decode(stale.value);
                }
                self.count("error");
                return Err(RevalidateError::Refresh(e));
            }
        };

        match outcome {
            FetchOutcome::NotModified => {
                let Some(stale) = stale else {
                    return Err(RevalidateError::MissingBaseline);
                };
                // Re-stamp the content tier; the value bytes are reused,
                // nothing is deserialized off the wire.
                self.store
                    .put(&self.key, CachedPayload::new(stale.value.clone(), stale.validator))
                    .await;
                self.count("revalidated");
                Self::decode(stale.value)
            }
            FetchOutcome::Fresh { value, validator } => {
                let json = serde_json::to_value(&value).map_err(RevalidateError::Decode)?;
                self.store
                    .put(&self.key, CachedPayload::new(json, validator))
                    .await;
                self.count("refresh");
                Ok(value)
            }
        }
    }

    fn decode(value: serde_json::Value) -> Result<T, RevalidateError<E>> {
        serde_json::from_value(value).map_err(RevalidateError::Decode)
    }

    fn count(&self, outcome: &str) {
        REVALIDATION_OUTCOMES
            .with_label_values(&[self.key.as_str(), outcome])
            .inc();
    }
}
