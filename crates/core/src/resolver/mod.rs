//! Multi-strategy search resolver.
//!
//! One invocation per video: derive the best identity key, walk the
//! strategy ladder (identity ID → TMDB ID → fuzzy title) until a strategy
//! yields entries, then reconcile each entry's files into
//! [`QueryResult`] records. [`ResultFilter`] prunes noise afterwards.

mod engine;
mod filter;
mod types;

pub use engine::SearchResolver;
pub use filter::{
    is_archive, ResultFilter, ARCHIVE_EXTENSIONS, MIN_SUBTITLE_BYTES, SUBTITLE_EXTENSIONS,
};
pub use types::{QueryResult, VideoMatchable};

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::crossref::CrossRefError;

/// Errors from a resolver query.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A catalog call failed. Zero results is not this error.
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    /// The identity lookup failed and could not degrade to a stale
    /// snapshot.
    #[error("identity lookup failed: {0}")]
    Identity(#[from] CrossRefError),
}
