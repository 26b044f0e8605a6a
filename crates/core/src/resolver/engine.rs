//! Search resolver: identity derivation, strategy ladder, reconciliation.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry, SearchParams};
use crate::crossref::{CrossRefRecord, IdentityIndex, IdSystem, IdValue};
use crate::media::Video;
use crate::metrics::RESOLVER_STRATEGY_HITS;

use super::filter::is_archive;
use super::types::{QueryResult, VideoMatchable};
use super::ResolverError;

/// Orchestrates one subtitle query per video.
///
/// Stateless across calls; everything that persists (catalog responses,
/// the identity snapshot) lives in the caches behind the injected
/// components.
pub struct SearchResolver {
    catalog: Arc<dyn Catalog>,
    identity: Arc<IdentityIndex>,
}

impl SearchResolver {
    pub fn new(catalog: Arc<dyn Catalog>, identity: Arc<IdentityIndex>) -> Self {
        Self { catalog, identity }
    }

    /// Resolve `video` to candidate subtitle files.
    ///
    /// All strategies exhausted with nothing found is `Ok(vec![])`, not an
    /// error. A catalog API error aborts the query.
    pub async fn query(&self, video: &Video) -> Result<Vec<QueryResult>, ResolverError> {
        let xref = self.resolve_identity(video).await?;
        let anilist_id = video
            .anilist_id()
            .or_else(|| xref.as_ref().and_then(|r| r.anilist_id));

        let entries = self.run_strategies(video, anilist_id).await?;
        if entries.is_empty() {
            debug!(title = video.search_title(), "no catalog entries found");
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for entry in entries {
            let files = self.catalog.files(entry.id).await?;
            let matchable = self.build_matchable(video, &entry, xref.as_ref());

            for file in files {
                if is_archive(&file.name) {
                    debug!(file = %file.name, "skipping unsupported archive");
                    continue;
                }
                let file_path = file.name.clone();
                let file_size = file.size;
                results.push(QueryResult {
                    entry: entry.clone(),
                    file,
                    file_path,
                    file_size,
                    is_archived: false,
                    archive_name: None,
                    archive_key: None,
                    matchable: matchable.clone(),
                });
            }
        }

        debug!(results = results.len(), "query reconciled");
        Ok(results)
    }

    /// Derive the cross-reference record for the video, if any.
    ///
    /// Consulted only when the video lacks a native identity ID but does
    /// carry a TMDB ID. A translation miss is not an error.
    async fn resolve_identity(
        &self,
        video: &Video,
    ) -> Result<Option<CrossRefRecord>, ResolverError> {
        if video.anilist_id().is_some() {
            return Ok(None);
        }
        let Some(tmdb) = video.tmdb() else {
            return Ok(None);
        };

        let record = self
            .identity
            .lookup(IdSystem::Tmdb, &IdValue::Numeric(tmdb.id))
            .await?;
        if record.is_none() {
            debug!(tmdb_id = tmdb.id, "no cross-reference record for tmdb id");
        }
        Ok(record)
    }

    /// Try the strategies in priority order; the first one producing at
    /// least one entry wins and later strategies are not attempted.
    async fn run_strategies(
        &self,
        video: &Video,
        anilist_id: Option<u64>,
    ) -> Result<Vec<CatalogEntry>, ResolverError> {
        if let Some(id) = anilist_id {
            let entries = self.catalog.search(&SearchParams::anilist(id)).await?;
            if !entries.is_empty() {
                debug!(anilist_id = id, entries = entries.len(), "identity-id search matched");
                RESOLVER_STRATEGY_HITS.with_label_values(&["anilist"]).inc();
                return Ok(entries);
            }
        }

        if let Some(tmdb) = video.tmdb() {
            let entries = self.catalog.search(&SearchParams::tmdb(tmdb)).await?;
            if !entries.is_empty() {
                debug!(tmdb = %tmdb, entries = entries.len(), "tmdb-id search matched");
                RESOLVER_STRATEGY_HITS.with_label_values(&["tmdb"]).inc();
                return Ok(entries);
            }
        }

        let title = video.search_title();
        let entries = self.catalog.search(&SearchParams::query(title)).await?;
        let strategy = if entries.is_empty() { "none" } else { "query" };
        debug!(query = title, entries = entries.len(), "fuzzy title search");
        RESOLVER_STRATEGY_HITS.with_label_values(&[strategy]).inc();
        Ok(entries)
    }

    fn build_matchable(
        &self,
        video: &Video,
        entry: &CatalogEntry,
        xref: Option<&CrossRefRecord>,
    ) -> VideoMatchable {
        match video {
            Video::Movie(movie) => VideoMatchable::for_movie(movie),
            Video::Episode(episode) => VideoMatchable::for_episode(episode, entry, xref),
        }
    }
}
