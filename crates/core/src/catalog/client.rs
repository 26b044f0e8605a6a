//! REST client for the subtitle catalog API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::{CachedPayload, CacheStore};
use crate::metrics::CATALOG_REQUESTS;

use super::types::{CatalogEntry, CatalogFile, EntryFlags, SearchParams, TmdbRef};
use super::{Catalog, CatalogError};

/// Typed client for the catalog's entry-search and file-listing endpoints.
///
/// Responses are cached by exact call signature for a medium TTL through
/// the shared [`CacheStore`] — entry metadata changes infrequently.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    store: Arc<dyn CacheStore>,
    cache_ttl: Duration,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// The API key is mandatory and rides in the `Authorization` header of
    /// every request.
    pub fn new(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
        store: Arc<dyn CacheStore>,
        cache_ttl: Duration,
    ) -> Result<Self, CatalogError> {
        if api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "catalog API key is required".to_string(),
            ));
        }

        let mut auth = HeaderValue::from_str(api_key).map_err(|_| {
            CatalogError::NotConfigured("catalog API key is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            cache_ttl,
        })
    }

    fn build_search_url(&self, params: &SearchParams) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(id) = params.anilist_id {
            pairs.push(("anilist_id", id.to_string()));
        }
        if let Some(tmdb) = params.tmdb {
            pairs.push(("tmdb_id", tmdb.to_string()));
        }
        if let Some(query) = &params.query {
            pairs.push(("query", query.clone()));
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();

        format!("{}/api/entries/search?{}", self.base_url, encoded.join("&"))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn cached<T>(&self, key: &str, endpoint: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let payload = self.store.get(key, self.cache_ttl).await?;
        match serde_json::from_value(payload.value) {
            Ok(value) => {
                CATALOG_REQUESTS
                    .with_label_values(&[endpoint, "cache"])
                    .inc();
                Some(value)
            }
            Err(e) => {
                warn!(key = key, error = %e, "discarding undecodable cached response");
                None
            }
        }
    }

    async fn remember<T: serde::Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.store.put(key, CachedPayload::new(json, None)).await,
            Err(e) => warn!(key = key, error = %e, "failed to cache response"),
        }
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<CatalogEntry>, CatalogError> {
        if params.is_empty() {
            return Err(CatalogError::EmptySearch);
        }

        let key = format!("catalog:search:{}", params.cache_key());
        if let Some(entries) = self.cached(&key, "search").await {
            return Ok(entries);
        }

        let url = self.build_search_url(params);
        debug!(params = %params.cache_key(), "catalog entry search");

        let wire: Vec<EntryResponse> = self.get_json(&url).await?;
        CATALOG_REQUESTS
            .with_label_values(&["search", "remote"])
            .inc();

        let entries: Vec<CatalogEntry> = wire.into_iter().map(CatalogEntry::from).collect();
        debug!(entries = entries.len(), "catalog search complete");

        self.remember(&key, &entries).await;
        Ok(entries)
    }

    async fn files(&self, entry_id: u64) -> Result<Vec<CatalogFile>, CatalogError> {
        let key = format!("catalog:files:{}", entry_id);
        if let Some(files) = self.cached(&key, "files").await {
            return Ok(files);
        }

        let url = format!("{}/api/entries/{}/files", self.base_url, entry_id);
        debug!(entry_id = entry_id, "catalog file listing");

        let wire: Vec<FileResponse> = self.get_json(&url).await?;
        CATALOG_REQUESTS
            .with_label_values(&["files", "remote"])
            .inc();

        let files: Vec<CatalogFile> = wire.into_iter().map(CatalogFile::from).collect();
        debug!(entry_id = entry_id, files = files.len(), "file listing complete");

        self.remember(&key, &files).await;
        Ok(files)
    }
}

// ============================================================================
// Catalog API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct EntryResponse {
    id: u64,
    name: String,
    japanese_name: Option<String>,
    english_name: Option<String>,
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    flags: FlagsResponse,
    anilist_id: Option<u64>,
    tmdb_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FlagsResponse {
    adult: Option<bool>,
    anime: Option<bool>,
    external: Option<bool>,
    movie: Option<bool>,
    unverified: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    name: String,
    size: u64,
    last_modified: Option<DateTime<Utc>>,
    url: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<EntryResponse> for CatalogEntry {
    fn from(r: EntryResponse) -> Self {
        let tmdb = r.tmdb_id.as_deref().and_then(|raw| match raw.parse::<TmdbRef>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(entry_id = r.id, error = %e, "ignoring malformed tmdb reference");
                None
            }
        });

        Self {
            id: r.id,
            name: r.name,
            japanese_name: r.japanese_name,
            english_name: r.english_name,
            last_modified: r.last_modified,
            flags: r.flags.into(),
            anilist_id: r.anilist_id,
            tmdb,
        }
    }
}

impl From<FlagsResponse> for EntryFlags {
    fn from(r: FlagsResponse) -> Self {
        Self {
            adult: r.adult.unwrap_or(false),
            anime: r.anime.unwrap_or(false),
            external: r.external.unwrap_or(false),
            movie: r.movie.unwrap_or(false),
            unverified: r.unverified.unwrap_or(false),
        }
    }
}

impl From<FileResponse> for CatalogFile {
    fn from(r: FileResponse) -> Self {
        Self {
            name: r.name,
            size: r.size,
            last_modified: r.last_modified,
            url: r.url,
        }
    }
}
