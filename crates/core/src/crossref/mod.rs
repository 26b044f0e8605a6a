//! Identity cross-reference index.
//!
//! A community dataset links each anime title across a dozen catalog ID
//! systems. This module fetches that dataset with conditional-GET
//! revalidation, indexes it per ID system, and answers point lookups like
//! "which record has TMDB ID 66875?" — the step that lets the resolver
//! translate a TMDB ID into the AniList ID the subtitle catalog prefers.

mod index;
mod source;
mod table;
mod types;

pub use index::IdentityIndex;
pub use source::DatasetSource;
pub use table::CrossRefTable;
pub use types::{CrossRefRecord, IdSystem, IdValue, MediaKind};

use thiserror::Error;

/// Default location of the cross-reference dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/Fribb/anime-lists/master/anime-list-mini.json";

/// Errors from dataset refresh and identity lookups.
#[derive(Debug, Error)]
pub enum CrossRefError {
    /// HTTP request failed (connect, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The dataset endpoint answered with a non-success status.
    #[error("identity dataset endpoint returned HTTP {status}")]
    Api { status: u16 },

    /// The dataset body could not be parsed.
    #[error("failed to parse identity dataset: {0}")]
    Parse(String),

    /// A cached snapshot was present but unusable.
    #[error("cached identity payload is unusable: {0}")]
    Cache(String),
}
