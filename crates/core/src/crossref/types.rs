//! Types for the identity cross-reference dataset.
//!
//! The dataset is a community-maintained JSON array where each row links
//! one title across the catalog ID systems below. Field names follow the
//! upstream wire format (`anime-planet_id`, `notify.moe_id`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Media kind of a cross-reference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaKind {
    Movie,
    Tv,
    #[default]
    Unknown,
    Ona,
    Ova,
    Special,
}

impl MediaKind {
    pub fn is_movie(&self) -> bool {
        matches!(self, MediaKind::Movie)
    }
}

/// The ID systems a record can link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdSystem {
    AniDb,
    AniList,
    AnimePlanet,
    AniSearch,
    Imdb,
    Kitsu,
    LiveChart,
    MyAnimeList,
    NotifyMoe,
    Tmdb,
    Tvdb,
}

impl fmt::Display for IdSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdSystem::AniDb => "anidb",
            IdSystem::AniList => "anilist",
            IdSystem::AnimePlanet => "anime-planet",
            IdSystem::AniSearch => "anisearch",
            IdSystem::Imdb => "imdb",
            IdSystem::Kitsu => "kitsu",
            IdSystem::LiveChart => "livechart",
            IdSystem::MyAnimeList => "mal",
            IdSystem::NotifyMoe => "notify.moe",
            IdSystem::Tmdb => "themoviedb",
            IdSystem::Tvdb => "thetvdb",
        };
        f.write_str(name)
    }
}

/// An ID value within one system. Some systems use numbers, others slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdValue {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Numeric(n) => write!(f, "{}", n),
            IdValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for IdValue {
    fn from(n: u64) -> Self {
        IdValue::Numeric(n)
    }
}

impl From<&str> for IdValue {
    fn from(s: &str) -> Self {
        IdValue::Text(s.to_string())
    }
}

/// One row of the identity dataset.
///
/// Every ID field is optional; the dataset may contain duplicate IDs
/// (resolved last-write-wins when indexed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CrossRefRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anidb_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anilist_id: Option<u64>,
    #[serde(
        rename = "anime-planet_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub anime_planet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anisearch_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitsu_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livechart_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mal_id: Option<u64>,
    #[serde(
        rename = "notify.moe_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notify_moe_id: Option<String>,
    #[serde(
        rename = "themoviedb_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tmdb_id: Option<u64>,
    #[serde(
        rename = "thetvdb_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tvdb_id: Option<u64>,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
}

impl CrossRefRecord {
    /// The record's ID within `system`, if present.
    pub fn id_for(&self, system: IdSystem) -> Option<IdValue> {
        match system {
            IdSystem::AniDb => self.anidb_id.map(IdValue::Numeric),
            IdSystem::AniList => self.anilist_id.map(IdValue::Numeric),
            IdSystem::AnimePlanet => self.anime_planet_id.clone().map(IdValue::Text),
            IdSystem::AniSearch => self.anisearch_id.map(IdValue::Numeric),
            IdSystem::Imdb => self.imdb_id.clone().map(IdValue::Text),
            IdSystem::Kitsu => self.kitsu_id.map(IdValue::Numeric),
            IdSystem::LiveChart => self.livechart_id.map(IdValue::Numeric),
            IdSystem::MyAnimeList => self.mal_id.map(IdValue::Numeric),
            IdSystem::NotifyMoe => self.notify_moe_id.clone().map(IdValue::Text),
            IdSystem::Tmdb => self.tmdb_id.map(IdValue::Numeric),
            IdSystem::Tvdb => self.tvdb_id.map(IdValue::Numeric),
        }
    }

    /// Whether the record carries no ID at all (useless for lookups).
    pub fn is_unlinked(&self) -> bool {
        const ALL: [IdSystem; 11] = [
            IdSystem::AniDb,
            IdSystem::AniList,
            IdSystem::AnimePlanet,
            IdSystem::AniSearch,
            IdSystem::Imdb,
            IdSystem::Kitsu,
            IdSystem::LiveChart,
            IdSystem::MyAnimeList,
            IdSystem::NotifyMoe,
            IdSystem::Tmdb,
            IdSystem::Tvdb,
        ];
        ALL.iter().all(|s| self.id_for(*s).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_field_names() {
        let json = r#"{
            "anidb_id": 9722,
            "anilist_id": 17549,
            "anime-planet_id": "non-non-biyori",
            "imdb_id": "tt3114358",
            "notify.moe_id": "CGzppFiig",
            "themoviedb_id": 66875,
            "thetvdb_id": 272316,
            "type": "TV"
        }"#;

        let record: CrossRefRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.anilist_id, Some(17549));
        assert_eq!(record.anime_planet_id.as_deref(), Some("non-non-biyori"));
        assert_eq!(record.notify_moe_id.as_deref(), Some("CGzppFiig"));
        assert_eq!(record.tmdb_id, Some(66875));
        assert_eq!(record.tvdb_id, Some(272316));
        assert_eq!(record.kind, MediaKind::Tv);
        assert_eq!(record.kitsu_id, None);
    }

    #[test]
    fn test_missing_kind_defaults_to_unknown() {
        let record: CrossRefRecord = serde_json::from_str(r#"{"anilist_id": 1}"#).unwrap();
        assert_eq!(record.kind, MediaKind::Unknown);
    }

    #[test]
    fn test_id_for_covers_numeric_and_text_systems() {
        let record = CrossRefRecord {
            tmdb_id: Some(66875),
            imdb_id: Some("tt3114358".to_string()),
            ..Default::default()
        };

        assert_eq!(record.id_for(IdSystem::Tmdb), Some(IdValue::Numeric(66875)));
        assert_eq!(
            record.id_for(IdSystem::Imdb),
            Some(IdValue::Text("tt3114358".to_string()))
        );
        assert_eq!(record.id_for(IdSystem::Kitsu), None);
    }

    #[test]
    fn test_is_unlinked() {
        assert!(CrossRefRecord::default().is_unlinked());
        let record = CrossRefRecord {
            mal_id: Some(1),
            ..Default::default()
        };
        assert!(!record.is_unlinked());
    }
}
