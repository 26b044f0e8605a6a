//! Provider facade: lifecycle and subtitle listing.
//!
//! A [`Provider`] is constructed from validated configuration, then
//! explicitly initialized before use. Every collaborator (catalog client,
//! identity index, cache store) is owned and injectable — there is no
//! ambient shared state.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::cache::{CacheStore, CacheTtl, MemoryCacheStore, RevalidatingCache};
use crate::catalog::{Catalog, CatalogClient, CatalogError};
use crate::config::{validate_config, Config, ConfigError, SanitizedConfig};
use crate::crossref::{CrossRefError, DatasetSource, IdentityIndex};
use crate::media::Video;
use crate::resolver::{ResolverError, ResultFilter, SearchResolver};
use crate::subtitle::{Language, SubtitleCandidate};

/// Cache key under which the identity dataset snapshot is stored.
const IDENTITY_CACHE_KEY: &str = "crossref:dataset";

/// Errors from the provider lifecycle and queries.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An operation was invoked before `initialize` (or after
    /// `terminate`).
    #[error("provider has not been initialized")]
    NotInitialized,

    /// Configuration rejected at construction.
    #[error("provider configuration invalid: {0}")]
    Config(#[from] ConfigError),

    /// The catalog client could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The identity dataset source could not be built.
    #[error(transparent)]
    CrossRef(#[from] CrossRefError),

    /// A query failed.
    #[error(transparent)]
    Query(#[from] ResolverError),
}

struct ProviderInner {
    resolver: SearchResolver,
    filter: ResultFilter,
    base_url: String,
}

/// Subtitle provider for the catalog.
pub struct Provider {
    config: Config,
    inner: Option<ProviderInner>,
}

impl Provider {
    /// Languages this provider can serve.
    pub fn languages() -> &'static [Language] {
        &[Language::Japanese]
    }

    /// Create an uninitialized provider from validated configuration.
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        validate_config(&config)?;
        Ok(Self {
            config,
            inner: None,
        })
    }

    /// Build the real collaborators and make the provider usable.
    ///
    /// All caches share one in-memory store; use
    /// [`Provider::initialize_with_store`] to supply a different one.
    pub fn initialize(&mut self) -> Result<(), ProviderError> {
        self.initialize_with_store(Arc::new(MemoryCacheStore::new()))
    }

    /// Initialize against a caller-supplied cache store.
    pub fn initialize_with_store(
        &mut self,
        store: Arc<dyn CacheStore>,
    ) -> Result<(), ProviderError> {
        let provider = &self.config.provider;
        let cache = &self.config.cache;
        let timeout = Duration::from_secs(provider.timeout_secs as u64);

        let source = DatasetSource::new(&provider.dataset_url, timeout)?;
        let ttl = CacheTtl::new(
            Duration::from_secs(cache.content_ttl_secs),
            Duration::from_secs(cache.validator_ttl_secs),
        );
        let identity = Arc::new(IdentityIndex::new(RevalidatingCache::new(
            IDENTITY_CACHE_KEY,
            ttl,
            store.clone(),
            Arc::new(source),
        )));

        let catalog: Arc<dyn Catalog> = Arc::new(CatalogClient::new(
            &provider.base_url,
            &provider.api_key,
            timeout,
            store,
            Duration::from_secs(cache.catalog_ttl_secs),
        )?);

        self.install(catalog, identity);
        Ok(())
    }

    /// Initialize with injected collaborators. Used by tests and by hosts
    /// that bring their own transport.
    pub fn initialize_with(&mut self, catalog: Arc<dyn Catalog>, identity: Arc<IdentityIndex>) {
        self.install(catalog, identity);
    }

    fn install(&mut self, catalog: Arc<dyn Catalog>, identity: Arc<IdentityIndex>) {
        debug!(base_url = %self.config.provider.base_url, "provider initialized");
        self.inner = Some(ProviderInner {
            resolver: SearchResolver::new(catalog, identity),
            filter: ResultFilter::new(),
            base_url: self.config.provider.base_url.trim_end_matches('/').to_string(),
        });
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    /// Tear the provider down. Terminating a provider that was never
    /// initialized is lifecycle misuse.
    pub fn terminate(&mut self) -> Result<(), ProviderError> {
        if self.inner.take().is_none() {
            return Err(ProviderError::NotInitialized);
        }
        debug!("provider terminated");
        Ok(())
    }

    /// Resolve `video` to filtered subtitle candidates.
    pub async fn list_subtitles(
        &self,
        video: &Video,
    ) -> Result<Vec<SubtitleCandidate>, ProviderError> {
        let inner = self.inner.as_ref().ok_or(ProviderError::NotInitialized)?;

        let results = inner.resolver.query(video).await?;
        let candidates: Vec<SubtitleCandidate> = results
            .iter()
            .filter(|result| inner.filter.accepts(result))
            .map(|result| SubtitleCandidate::from_result(&inner.base_url, result))
            .collect();

        debug!(
            results = results.len(),
            candidates = candidates.len(),
            "subtitles listed"
        );
        Ok(candidates)
    }

    /// Configuration with the API key redacted, for display.
    pub fn sanitized_config(&self) -> SanitizedConfig {
        (&self.config).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn config() -> Config {
        load_config_from_str("[provider]\napi_key = \"test-key\"\n").unwrap()
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let config = load_config_from_str("[provider]\napi_key = \"\"\n").unwrap();
        assert!(matches!(
            Provider::new(config),
            Err(ProviderError::Config(_))
        ));
    }

    #[test]
    fn test_terminate_before_initialize_is_an_error() {
        let mut provider = Provider::new(config()).unwrap();
        assert!(matches!(
            provider.terminate(),
            Err(ProviderError::NotInitialized)
        ));
    }

    #[test]
    fn test_initialize_then_terminate() {
        let mut provider = Provider::new(config()).unwrap();
        provider.initialize().unwrap();
        assert!(provider.is_initialized());
        provider.terminate().unwrap();
        assert!(!provider.is_initialized());
        // A second terminate is misuse again.
        assert!(matches!(
            provider.terminate(),
            Err(ProviderError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_query_before_initialize_is_an_error() {
        let provider = Provider::new(config()).unwrap();
        let video = Video::Episode(crate::media::Episode::new("Non Non Biyori"));
        assert!(matches!(
            provider.list_subtitles(&video).await,
            Err(ProviderError::NotInitialized)
        ));
    }
}
