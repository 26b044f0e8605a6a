//! Subtitle catalog API client.
//!
//! The catalog exposes entry search (`GET /api/entries/search`) and
//! per-entry file listings (`GET /api/entries/{id}/files`), both behind an
//! API key. The [`Catalog`] trait is the seam the resolver depends on,
//! implemented by [`CatalogClient`] for the real service and by
//! `testing::MockCatalog` in tests.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::{
    CatalogEntry, CatalogFile, EntryFlags, ParseTmdbRefError, SearchParams, TmdbKind, TmdbRef,
};

use async_trait::async_trait;
use thiserror::Error;

/// Default base URL of the subtitle catalog.
pub const DEFAULT_BASE_URL: &str = "https://jimaku.cc";

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, ...). Never masked by the
    /// client; the caller decides what to do.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status. Fatal for the call;
    /// there is no implicit retry.
    #[error("catalog API error: HTTP {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed.
    #[error("failed to parse catalog response: {0}")]
    Parse(String),

    /// `search` was called without any identifying parameter. This is a
    /// programming error, not a retryable condition.
    #[error("search requires at least one of anilist_id, tmdb, query")]
    EmptySearch,

    /// Client construction failed (missing API key, ...).
    #[error("catalog client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for catalog backends.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search catalog entries. Result order follows the remote API.
    async fn search(&self, params: &SearchParams) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// List the files under an entry. Result order follows the remote API.
    async fn files(&self, entry_id: u64) -> Result<Vec<CatalogFile>, CatalogError>;
}
