//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the network-facing
//! traits, allowing resolver and provider tests to run without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use animusub_core::testing::{fixtures, MockCatalog, MockDataset};
//!
//! let catalog = MockCatalog::new();
//! catalog.set_entries(vec![fixtures::entry(9, "Non Non Biyori")]).await;
//! catalog.set_files(9, vec![fixtures::file("Ep01.srt", 10_000)]).await;
//!
//! let dataset = MockDataset::new();
//! dataset.push_fresh(vec![fixtures::tv_record()], "etag-1").await;
//! ```

mod mock_catalog;
mod mock_dataset;

pub use mock_catalog::MockCatalog;
pub use mock_dataset::MockDataset;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use crate::cache::{CacheTtl, MemoryCacheStore, RevalidatingCache};
    use crate::catalog::{CatalogEntry, CatalogFile, EntryFlags, TmdbRef};
    use crate::crossref::{CrossRefRecord, IdentityIndex, MediaKind};

    use super::MockDataset;

    /// A TV record linking TMDB 66875 to AniList 17549 (Non Non Biyori).
    pub fn tv_record() -> CrossRefRecord {
        CrossRefRecord {
            anidb_id: Some(9722),
            anilist_id: Some(17549),
            anime_planet_id: Some("non-non-biyori".to_string()),
            anisearch_id: Some(8390),
            imdb_id: Some("tt3114358".to_string()),
            kitsu_id: Some(7711),
            livechart_id: Some(93),
            mal_id: Some(17549),
            notify_moe_id: Some("CGzppFiig".to_string()),
            tmdb_id: Some(66875),
            tvdb_id: Some(272316),
            kind: MediaKind::Tv,
        }
    }

    /// A movie record (Nasu: Summer in Andalusia).
    pub fn movie_record() -> CrossRefRecord {
        CrossRefRecord {
            anidb_id: Some(1292),
            anilist_id: Some(1209),
            anime_planet_id: Some("nasu-summer-in-andalusia".to_string()),
            anisearch_id: Some(673),
            imdb_id: Some("tt0382868".to_string()),
            kitsu_id: Some(1087),
            livechart_id: Some(5776),
            mal_id: Some(1209),
            notify_moe_id: Some("A3dxcFmmR".to_string()),
            tmdb_id: Some(60843),
            tvdb_id: None,
            kind: MediaKind::Movie,
        }
    }

    /// A catalog entry with reasonable defaults.
    pub fn entry(id: u64, name: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            japanese_name: None,
            english_name: None,
            last_modified: None,
            flags: EntryFlags {
                anime: true,
                ..Default::default()
            },
            anilist_id: None,
            tmdb: None,
        }
    }

    /// An entry carrying both external IDs.
    pub fn linked_entry(id: u64, name: &str, anilist_id: u64, tmdb: TmdbRef) -> CatalogEntry {
        CatalogEntry {
            anilist_id: Some(anilist_id),
            tmdb: Some(tmdb),
            ..entry(id, name)
        }
    }

    /// A catalog file with a download URL derived from the name.
    pub fn file(name: &str, size: u64) -> CatalogFile {
        CatalogFile {
            name: name.to_string(),
            size,
            last_modified: None,
            url: format!("https://catalog.example/files/{}", name),
        }
    }

    /// An identity index over a scripted dataset, with its own store.
    pub fn identity_index(dataset: Arc<MockDataset>, ttl: CacheTtl) -> Arc<IdentityIndex> {
        let store = Arc::new(MemoryCacheStore::new());
        Arc::new(IdentityIndex::new(RevalidatingCache::new(
            "crossref:dataset",
            ttl,
            store,
            dataset,
        )))
    }
}
