//! Result records produced by the search resolver.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CatalogFile};
use crate::crossref::{CrossRefRecord, IdSystem, IdValue};
use crate::media::{Episode, Movie};

/// The identity attributes a result carries for downstream match-scoring.
///
/// Built once per catalog entry (the entry-level fields don't vary by
/// file) and shared by every result of that entry. A movie matchable never
/// sets episode-only fields, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMatchable {
    // Movie-level fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,

    // Episode-level fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_series: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_tvdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_anilist_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_tmdb_id: Option<u64>,

    // Shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl VideoMatchable {
    /// Matchable for a movie result. Movie-level IDs come from the video's
    /// own attributes; there is no cross-reference fallback here.
    pub fn for_movie(movie: &Movie) -> Self {
        Self {
            title: Some(movie.title.clone()),
            year: movie.year,
            imdb_id: movie.imdb_id.clone(),
            tmdb_id: movie.tmdb_id,
            alternative_titles: movie.alternative_titles.clone(),
            ..Default::default()
        }
    }

    /// Matchable for an episode result. Series-level IDs prefer the
    /// video's own attributes, then the entry, then the cross-reference
    /// record resolved for this query.
    pub fn for_episode(
        episode: &Episode,
        entry: &CatalogEntry,
        xref: Option<&CrossRefRecord>,
    ) -> Self {
        let xref_numeric = |system: IdSystem| {
            xref.and_then(|r| r.id_for(system)).and_then(|id| match id {
                IdValue::Numeric(n) => Some(n),
                IdValue::Text(_) => None,
            })
        };
        let xref_text = |system: IdSystem| {
            xref.and_then(|r| r.id_for(system)).and_then(|id| match id {
                IdValue::Text(s) => Some(s),
                IdValue::Numeric(_) => None,
            })
        };

        Self {
            series: Some(episode.series.clone()),
            season: episode.season,
            episode: episode.episode,
            year: episode.year,
            alternative_series: episode.alternative_series.clone(),
            series_imdb_id: episode
                .series_imdb_id
                .clone()
                .or_else(|| xref_text(IdSystem::Imdb)),
            series_tvdb_id: episode.series_tvdb_id.or_else(|| xref_numeric(IdSystem::Tvdb)),
            series_anilist_id: episode
                .series_anilist_id
                .or(entry.anilist_id)
                .or_else(|| xref_numeric(IdSystem::AniList)),
            series_tmdb_id: episode
                .series_tmdb_id
                .or_else(|| entry.tmdb.map(|t| t.id))
                .or_else(|| xref_numeric(IdSystem::Tmdb)),
            ..Default::default()
        }
    }
}

/// One candidate subtitle file, reconciled from a catalog entry and one of
/// its files.
///
/// `file_path` is the unique key downstream code uses for the subtitle.
/// When `is_archived` is true it takes the form
/// `"<archive-name>/<internal-path>"`; archive traversal is not
/// implemented yet, so today `is_archived` is always false and archive
/// files never produce a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub entry: CatalogEntry,
    pub file: CatalogFile,
    pub file_path: String,
    pub file_size: u64,
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_key: Option<String>,
    pub matchable: VideoMatchable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntryFlags, TmdbRef};

    fn entry() -> CatalogEntry {
        CatalogEntry {
            id: 9,
            name: "Non Non Biyori".to_string(),
            japanese_name: None,
            english_name: None,
            last_modified: None,
            flags: EntryFlags::default(),
            anilist_id: Some(17549),
            tmdb: Some(TmdbRef::tv(66875)),
        }
    }

    #[test]
    fn test_movie_matchable_has_no_episode_fields() {
        let mut movie = Movie::new("Nasu: Summer in Andalusia");
        movie.year = Some(2003);
        movie.imdb_id = Some("tt0382868".to_string());
        movie.tmdb_id = Some(60843);

        let matchable = VideoMatchable::for_movie(&movie);
        assert_eq!(matchable.title.as_deref(), Some("Nasu: Summer in Andalusia"));
        assert_eq!(matchable.tmdb_id, Some(60843));
        assert_eq!(matchable.series, None);
        assert_eq!(matchable.season, None);
        assert_eq!(matchable.episode, None);
        assert!(matchable.alternative_series.is_empty());
        assert_eq!(matchable.series_anilist_id, None);
        assert_eq!(matchable.series_tmdb_id, None);
    }

    #[test]
    fn test_episode_matchable_has_no_movie_fields() {
        let mut episode = Episode::new("Non Non Biyori");
        episode.season = Some(1);
        episode.episode = Some(1);

        let matchable = VideoMatchable::for_episode(&episode, &entry(), None);
        assert_eq!(matchable.title, None);
        assert_eq!(matchable.imdb_id, None);
        assert_eq!(matchable.tmdb_id, None);
        assert_eq!(matchable.series.as_deref(), Some("Non Non Biyori"));
        assert_eq!(matchable.season, Some(1));
    }

    #[test]
    fn test_episode_matchable_prefers_video_attributes() {
        let mut episode = Episode::new("Non Non Biyori");
        episode.series_anilist_id = Some(1);
        episode.series_tmdb_id = Some(2);

        let xref = CrossRefRecord {
            anilist_id: Some(17549),
            tmdb_id: Some(66875),
            ..Default::default()
        };

        let matchable = VideoMatchable::for_episode(&episode, &entry(), Some(&xref));
        assert_eq!(matchable.series_anilist_id, Some(1));
        assert_eq!(matchable.series_tmdb_id, Some(2));
    }

    #[test]
    fn test_episode_matchable_falls_back_to_crossref() {
        let episode = Episode::new("Non Non Biyori");

        let xref = CrossRefRecord {
            anilist_id: Some(17549),
            tmdb_id: Some(66875),
            tvdb_id: Some(272316),
            imdb_id: Some("tt3114358".to_string()),
            ..Default::default()
        };

        let mut bare_entry = entry();
        bare_entry.anilist_id = None;
        bare_entry.tmdb = None;

        let matchable = VideoMatchable::for_episode(&episode, &bare_entry, Some(&xref));
        assert_eq!(matchable.series_anilist_id, Some(17549));
        assert_eq!(matchable.series_tmdb_id, Some(66875));
        assert_eq!(matchable.series_tvdb_id, Some(272316));
        assert_eq!(matchable.series_imdb_id.as_deref(), Some("tt3114358"));
    }

    #[test]
    fn test_episode_matchable_uses_entry_before_crossref() {
        let episode = Episode::new("Non Non Biyori");
        let xref = CrossRefRecord {
            anilist_id: Some(999),
            ..Default::default()
        };

        let matchable = VideoMatchable::for_episode(&episode, &entry(), Some(&xref));
        assert_eq!(matchable.series_anilist_id, Some(17549));
        assert_eq!(matchable.series_tmdb_id, Some(66875));
    }
}
