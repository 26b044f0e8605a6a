//! Subtitle candidate value objects handed back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::{QueryResult, VideoMatchable};

/// Subtitle language. The catalog serves Japanese subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Japanese,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One subtitle candidate for the host's scoring logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    pub language: Language,
    /// Unique identifier within the provider: the reconciled file path.
    pub id: String,
    /// Human-facing page for the catalog entry the file belongs to.
    pub page_link: String,
    /// Direct download URL for the file.
    pub download_url: String,
    /// Identity attributes for match-scoring.
    pub matchable: VideoMatchable,
}

impl SubtitleCandidate {
    /// Build a candidate from a reconciled query result.
    pub fn from_result(base_url: &str, result: &QueryResult) -> Self {
        Self {
            language: Language::Japanese,
            id: result.file_path.clone(),
            page_link: format!("{}/entry/{}", base_url.trim_end_matches('/'), result.entry.id),
            download_url: result.file.url.clone(),
            matchable: result.matchable.clone(),
        }
    }

    /// Short display string for logs and pickers.
    pub fn info(&self) -> String {
        let m = &self.matchable;
        match (&m.series, &m.title) {
            (Some(series), _) => {
                let name = match m.year {
                    Some(year) => format!("{} ({})", series, year),
                    None => series.clone(),
                };
                match (m.season, m.episode) {
                    (Some(season), Some(episode)) => {
                        format!("{} s{:02}e{:02} - {}", name, season, episode, self.id)
                    }
                    _ => format!("{} - {}", name, self.id),
                }
            }
            (None, Some(title)) => match m.year {
                Some(year) => format!("{} ({}) - {}", title, year, self.id),
                None => format!("{} - {}", title, self.id),
            },
            (None, None) => self.id.clone(),
        }
    }
}
