//! Mock catalog for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{Catalog, CatalogEntry, CatalogError, CatalogFile, SearchParams};

/// A search handler that produces results dynamically from the params.
type SearchHandler =
    Box<dyn Fn(&SearchParams) -> Result<Vec<CatalogEntry>, CatalogError> + Send + Sync>;

/// Mock implementation of the [`Catalog`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable entries and file listings
/// - Track search parameters for assertions
/// - Simulate failures, globally or per search shape
pub struct MockCatalog {
    /// Default entries returned by any search without a handler.
    entries: RwLock<Vec<CatalogEntry>>,
    /// File listings per entry ID.
    files: RwLock<HashMap<u64, Vec<CatalogFile>>>,
    /// Recorded search parameters.
    searches: RwLock<Vec<SearchParams>>,
    /// If set, the next search fails with this error.
    next_error: RwLock<Option<CatalogError>>,
    /// Dynamic handler taking precedence over `entries`.
    handler: RwLock<Option<SearchHandler>>,
}

impl std::fmt::Debug for MockCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCatalog").finish_non_exhaustive()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            files: RwLock::new(HashMap::new()),
            searches: RwLock::new(Vec::new()),
            next_error: RwLock::new(None),
            handler: RwLock::new(None),
        }
    }

    /// Entries returned by any search (unless a handler is set).
    pub async fn set_entries(&self, entries: Vec<CatalogEntry>) {
        *self.entries.write().await = entries;
    }

    /// File listing for one entry ID.
    pub async fn set_files(&self, entry_id: u64, files: Vec<CatalogFile>) {
        self.files.write().await.insert(entry_id, files);
    }

    /// Fail the next search with `error`.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Dynamic per-params behavior, e.g. "error if the fuzzy strategy is
    /// ever tried".
    pub async fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&SearchParams) -> Result<Vec<CatalogEntry>, CatalogError> + Send + Sync + 'static,
    {
        *self.handler.write().await = Some(Box::new(handler));
    }

    /// All search parameters seen so far, in call order.
    pub async fn recorded_searches(&self) -> Vec<SearchParams> {
        self.searches.read().await.clone()
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, params: &SearchParams) -> Result<Vec<CatalogEntry>, CatalogError> {
        if params.is_empty() {
            return Err(CatalogError::EmptySearch);
        }

        self.searches.write().await.push(params.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(handler) = self.handler.read().await.as_ref() {
            return handler(params);
        }

        Ok(self.entries.read().await.clone())
    }

    async fn files(&self, entry_id: u64) -> Result<Vec<CatalogFile>, CatalogError> {
        Ok(self
            .files
            .read()
            .await
            .get(&entry_id)
            .cloned()
            .unwrap_or_default())
    }
}
