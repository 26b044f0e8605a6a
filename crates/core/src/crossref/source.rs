//! HTTP source for the identity dataset.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::cache::{ConditionalFetch, FetchOutcome};

use super::types::CrossRefRecord;
use super::CrossRefError;

/// Fetches the cross-reference dataset with standard conditional-GET
/// semantics: the last-known ETag rides in `If-None-Match`, a 304 answer
/// means unchanged, any 2xx carries a fresh ETag plus the full body.
pub struct DatasetSource {
    client: Client,
    url: String,
}

impl DatasetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CrossRefError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConditionalFetch for DatasetSource {
    type Value = Vec<CrossRefRecord>;
    type Error = CrossRefError;

    async fn fetch(
        &self,
        validator: Option<&str>,
    ) -> Result<FetchOutcome<Vec<CrossRefRecord>>, CrossRefError> {
        let mut request = self.client.get(&self.url);
        if let Some(tag) = validator {
            request = request.header(IF_NONE_MATCH, tag);
        }

        debug!(url = %self.url, conditional = validator.is_some(), "fetching identity dataset");

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!("identity dataset unchanged");
            return Ok(FetchOutcome::NotModified);
        }
        if !status.is_success() {
            return Err(CrossRefError::Api {
                status: status.as_u16(),
            });
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let records: Vec<CrossRefRecord> = response
            .json()
            .await
            .map_err(|e| CrossRefError::Parse(e.to_string()))?;

        debug!(records = records.len(), "identity dataset fetched");

        Ok(FetchOutcome::Fresh {
            value: records,
            validator: etag,
        })
    }
}
