//! Mock identity dataset source for testing.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::cache::{ConditionalFetch, FetchOutcome};
use crate::crossref::{CrossRefError, CrossRefRecord};

/// One scripted response.
enum Scripted {
    Fresh {
        records: Vec<CrossRefRecord>,
        etag: Option<String>,
    },
    NotModified,
    Error,
}

/// Mock implementation of the dataset source.
///
/// Responses are scripted in order; each fetch consumes one. An exhausted
/// script fails, so a test asserting "no further network calls" can
/// simply not push more responses. Validators presented by the caller are
/// recorded for assertions.
#[derive(Default)]
pub struct MockDataset {
    script: Mutex<Vec<Scripted>>,
    calls: AtomicU64,
    seen_validators: Mutex<Vec<Option<String>>>,
}

impl std::fmt::Debug for MockDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDataset").finish_non_exhaustive()
    }
}

impl MockDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full response carrying `records` and `etag`.
    pub async fn push_fresh(&self, records: Vec<CrossRefRecord>, etag: &str) {
        self.script.lock().await.push(Scripted::Fresh {
            records,
            etag: Some(etag.to_string()),
        });
    }

    /// Queue a not-modified response.
    pub async fn push_not_modified(&self) {
        self.script.lock().await.push(Scripted::NotModified);
    }

    /// Queue a failed fetch.
    pub async fn push_error(&self) {
        self.script.lock().await.push(Scripted::Error);
    }

    /// Number of fetches performed.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Validators presented by the caller, in call order.
    pub async fn seen_validators(&self) -> Vec<Option<String>> {
        self.seen_validators.lock().await.clone()
    }
}

#[async_trait]
impl ConditionalFetch for MockDataset {
    type Value = Vec<CrossRefRecord>;
    type Error = CrossRefError;

    async fn fetch(
        &self,
        validator: Option<&str>,
    ) -> Result<FetchOutcome<Vec<CrossRefRecord>>, CrossRefError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_validators
            .lock()
            .await
            .push(validator.map(String::from));

        let mut script = self.script.lock().await;
        if script.is_empty() {
            return Err(CrossRefError::Api { status: 599 });
        }
        match script.remove(0) {
            Scripted::Fresh { records, etag } => Ok(FetchOutcome::Fresh {
                value: records,
                validator: etag,
            }),
            Scripted::NotModified => Ok(FetchOutcome::NotModified),
            Scripted::Error => Err(CrossRefError::Api { status: 503 }),
        }
    }
}
