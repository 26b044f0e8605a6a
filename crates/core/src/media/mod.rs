//! Video model at the host boundary.
//!
//! The host media manager hands the provider one of these per query. Only
//! the identity-relevant attributes are modeled; codec/release details
//! stay on the host's side of the boundary.

use serde::{Deserialize, Serialize};

use crate::catalog::TmdbRef;

/// A movie to find subtitles for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anilist_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A TV episode to find subtitles for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Series title.
    pub series: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u16>,
    /// Episode title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_tvdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_tmdb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_anilist_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_series: Vec<String>,
}

impl Episode {
    pub fn new(series: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            ..Default::default()
        }
    }
}

/// Either kind of video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Video {
    Movie(Movie),
    Episode(Episode),
}

impl Video {
    pub fn is_movie(&self) -> bool {
        matches!(self, Video::Movie(_))
    }

    /// Title used for fuzzy catalog search: the series title for episodes,
    /// the display title for movies.
    pub fn search_title(&self) -> &str {
        match self {
            Video::Movie(m) => &m.title,
            Video::Episode(e) => &e.series,
        }
    }

    /// Native cross-catalog identity ID, if the video already carries one.
    pub fn anilist_id(&self) -> Option<u64> {
        match self {
            Video::Movie(m) => m.anilist_id,
            Video::Episode(e) => e.series_anilist_id,
        }
    }

    /// Typed TMDB reference, if the video carries the numeric ID.
    pub fn tmdb(&self) -> Option<TmdbRef> {
        match self {
            Video::Movie(m) => m.tmdb_id.map(TmdbRef::movie),
            Video::Episode(e) => e.series_tmdb_id.map(TmdbRef::tv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_title_per_kind() {
        let movie = Video::Movie(Movie::new("Nasu: Summer in Andalusia"));
        assert_eq!(movie.search_title(), "Nasu: Summer in Andalusia");

        let episode = Video::Episode(Episode::new("Non Non Biyori"));
        assert_eq!(episode.search_title(), "Non Non Biyori");
    }

    #[test]
    fn test_tmdb_ref_kind_follows_video_kind() {
        let mut movie = Movie::new("Nasu");
        movie.tmdb_id = Some(60843);
        assert_eq!(Video::Movie(movie).tmdb(), Some(TmdbRef::movie(60843)));

        let mut episode = Episode::new("Non Non Biyori");
        episode.series_tmdb_id = Some(66875);
        assert_eq!(Video::Episode(episode).tmdb(), Some(TmdbRef::tv(66875)));
    }

    #[test]
    fn test_videos_without_ids_expose_none() {
        let episode = Video::Episode(Episode::new("Non Non Biyori"));
        assert_eq!(episode.anilist_id(), None);
        assert_eq!(episode.tmdb(), None);
    }
}
