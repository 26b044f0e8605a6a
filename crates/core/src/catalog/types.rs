//! Types for the subtitle catalog API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a TMDB reference points at a movie or a TV series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TmdbKind {
    Movie,
    Tv,
}

/// A typed TMDB reference, serialized on the wire as `"movie:<id>"` or
/// `"tv:<id>"`. Carrying the kind in the type makes "tmdb id without the
/// movie/tv flag" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TmdbRef {
    pub kind: TmdbKind,
    pub id: u64,
}

impl TmdbRef {
    pub fn movie(id: u64) -> Self {
        Self {
            kind: TmdbKind::Movie,
            id,
        }
    }

    pub fn tv(id: u64) -> Self {
        Self {
            kind: TmdbKind::Tv,
            id,
        }
    }

    pub fn is_movie(&self) -> bool {
        matches!(self.kind, TmdbKind::Movie)
    }
}

impl fmt::Display for TmdbRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TmdbKind::Movie => "movie",
            TmdbKind::Tv => "tv",
        };
        write!(f, "{}:{}", kind, self.id)
    }
}

/// Error parsing a `"<movie|tv>:<id>"` reference.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid tmdb reference '{0}', expected '<movie|tv>:<id>'")]
pub struct ParseTmdbRefError(pub String);

impl FromStr for TmdbRef {
    type Err = ParseTmdbRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| ParseTmdbRefError(s.to_string()))?;
        let kind = match kind {
            "movie" => TmdbKind::Movie,
            "tv" => TmdbKind::Tv,
            _ => return Err(ParseTmdbRefError(s.to_string())),
        };
        let id = id.parse().map_err(|_| ParseTmdbRefError(s.to_string()))?;
        Ok(Self { kind, id })
    }
}

impl TryFrom<String> for TmdbRef {
    type Error = ParseTmdbRefError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TmdbRef> for String {
    fn from(r: TmdbRef) -> Self {
        r.to_string()
    }
}

/// Editorial flags on a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFlags {
    /// The entry is meant for adult audiences.
    #[serde(default)]
    pub adult: bool,
    /// The entry is for an anime.
    #[serde(default)]
    pub anime: bool,
    /// The entry comes from an external source.
    #[serde(default)]
    pub external: bool,
    /// The entry is a movie.
    #[serde(default)]
    pub movie: bool,
    /// The entry has not been checked by editors.
    #[serde(default)]
    pub unverified: bool,
}

/// A catalog search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The entry ID.
    pub id: u64,
    /// The romaji name of the entry.
    pub name: String,
    /// The Japanese name, i.e. with kanji and kana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese_name: Option<String>,
    /// The English name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
    /// When the newest file under this entry was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Editorial flags.
    #[serde(default)]
    pub flags: EntryFlags,
    /// The AniList ID of this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anilist_id: Option<u64>,
    /// The TMDB reference of this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<TmdbRef>,
}

/// A file under a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// File name as uploaded.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Direct download URL.
    pub url: String,
}

/// Parameters for an entry search.
///
/// At least one of the three must be set; an all-empty search is a
/// programming error surfaced as [`super::CatalogError::EmptySearch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub anilist_id: Option<u64>,
    pub tmdb: Option<TmdbRef>,
    pub query: Option<String>,
}

impl SearchParams {
    pub fn anilist(id: u64) -> Self {
        Self {
            anilist_id: Some(id),
            ..Default::default()
        }
    }

    pub fn tmdb(tmdb: TmdbRef) -> Self {
        Self {
            tmdb: Some(tmdb),
            ..Default::default()
        }
    }

    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anilist_id.is_none() && self.tmdb.is_none() && self.query.is_none()
    }

    /// Stable key for caching responses by exact parameter tuple.
    pub fn cache_key(&self) -> String {
        format!(
            "anilist={};tmdb={};query={}",
            self.anilist_id.map(|v| v.to_string()).unwrap_or_default(),
            self.tmdb.map(|v| v.to_string()).unwrap_or_default(),
            self.query.as_deref().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_ref_display() {
        assert_eq!(TmdbRef::movie(603).to_string(), "movie:603");
        assert_eq!(TmdbRef::tv(12345).to_string(), "tv:12345");
    }

    #[test]
    fn test_tmdb_ref_parse() {
        assert_eq!("movie:603".parse::<TmdbRef>().unwrap(), TmdbRef::movie(603));
        assert_eq!("tv:12345".parse::<TmdbRef>().unwrap(), TmdbRef::tv(12345));
        assert!("series:1".parse::<TmdbRef>().is_err());
        assert!("tv:abc".parse::<TmdbRef>().is_err());
        assert!("12345".parse::<TmdbRef>().is_err());
    }

    #[test]
    fn test_entry_deserializes_wire_tmdb_id() {
        let json = r#"{
            "id": 100,
            "name": "Sousou no Frieren",
            "japanese_name": "葬送のフリーレン",
            "flags": {"anime": true},
            "anilist_id": 154587,
            "tmdb": "tv:209867"
        }"#;

        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tmdb, Some(TmdbRef::tv(209867)));
        assert!(entry.flags.anime);
        assert!(!entry.flags.movie);
        assert_eq!(entry.english_name, None);
    }

    #[test]
    fn test_search_params_cache_key_is_exact() {
        let a = SearchParams::anilist(17549);
        let b = SearchParams::tmdb(TmdbRef::tv(66875));
        let c = SearchParams::query("non non biyori");

        assert_ne!(a.cache_key(), b.cache_key());
        assert_ne!(b.cache_key(), c.cache_key());
        assert_eq!(a.cache_key(), SearchParams::anilist(17549).cache_key());
    }

    #[test]
    fn test_search_params_is_empty() {
        assert!(SearchParams::default().is_empty());
        assert!(!SearchParams::query("x").is_empty());
    }
}
