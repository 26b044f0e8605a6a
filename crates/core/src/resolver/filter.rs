//! Noise filtering over resolver output.

use regex_lite::Regex;

use super::types::QueryResult;

/// Extensions accepted as real subtitle payloads.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "sub", "smi", "vtt", "txt", "mpl"];

/// Archive extensions the resolver cannot traverse yet.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "7z"];

/// Files smaller than this are assumed to be placeholders or corrupt.
pub const MIN_SUBTITLE_BYTES: u64 = 500;

/// The final dot-segment of a file name, lower-cased. A name without a
/// dot has no extension.
fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

/// Whether the file has an archive extension the resolver must skip.
pub fn is_archive(name: &str) -> bool {
    extension(name).is_some_and(|ext| ARCHIVE_EXTENSIONS.contains(&ext.as_str()))
}

/// Drops noise results: auto-generated transcripts, non-subtitle
/// extensions, and undersized files.
#[derive(Debug)]
pub struct ResultFilter {
    low_quality_tag: Regex,
}

impl ResultFilter {
    pub fn new() -> Self {
        // Known auto-transcription tags, bracketed either way.
        let low_quality_tag = Regex::new(r"(?i)[\[\(](whisperai|whisper)[\]\)]")
            .expect("low-quality tag pattern is valid");
        Self { low_quality_tag }
    }

    /// All three checks must pass for the result to survive.
    pub fn accepts(&self, result: &QueryResult) -> bool {
        !self.low_quality_tag.is_match(&result.file_path)
            && extension(&result.file_path)
                .is_some_and(|ext| SUBTITLE_EXTENSIONS.contains(&ext.as_str()))
            && result.file_size >= MIN_SUBTITLE_BYTES
    }
}

impl Default for ResultFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CatalogFile, EntryFlags};
    use crate::resolver::VideoMatchable;

    fn result(name: &str, size: u64) -> QueryResult {
        QueryResult {
            entry: CatalogEntry {
                id: 1,
                name: "Show".to_string(),
                japanese_name: None,
                english_name: None,
                last_modified: None,
                flags: EntryFlags::default(),
                anilist_id: None,
                tmdb: None,
            },
            file: CatalogFile {
                name: name.to_string(),
                size,
                last_modified: None,
                url: format!("https://catalog.example/files/{}", name),
            },
            file_path: name.to_string(),
            file_size: size,
            is_archived: false,
            archive_name: None,
            archive_key: None,
            matchable: VideoMatchable::default(),
        }
    }

    #[test]
    fn test_rejects_whisper_tags() {
        let filter = ResultFilter::new();
        assert!(!filter.accepts(&result("Show [WhisperAI].srt", 2000)));
        assert!(!filter.accepts(&result("Show (whisper).srt", 2000)));
        assert!(!filter.accepts(&result("Show [Whisper].ass", 2000)));
    }

    #[test]
    fn test_unbracketed_whisper_passes() {
        let filter = ResultFilter::new();
        assert!(filter.accepts(&result("Whispers of the Heart.srt", 2000)));
    }

    #[test]
    fn test_rejects_non_subtitle_extension() {
        let filter = ResultFilter::new();
        assert!(!filter.accepts(&result("Show.nfo", 2000)));
        assert!(!filter.accepts(&result("Show.mkv", 2000)));
    }

    #[test]
    fn test_extension_is_final_dot_segment() {
        let filter = ResultFilter::new();
        // Earlier dot segments must not be mistaken for the extension.
        assert!(filter.accepts(&result("Show.S01E01.1080p.srt", 2000)));
        assert!(!filter.accepts(&result("Show.srt.part", 2000)));
    }

    #[test]
    fn test_rejects_undersized_files() {
        let filter = ResultFilter::new();
        assert!(!filter.accepts(&result("Show.srt", 10)));
        assert!(filter.accepts(&result("Show.srt", MIN_SUBTITLE_BYTES)));
    }

    #[test]
    fn test_accepts_plain_subtitle() {
        let filter = ResultFilter::new();
        assert!(filter.accepts(&result("Show.srt", 2000)));
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive("Bundle.zip"));
        assert!(is_archive("Bundle.7z"));
        assert!(is_archive("Bundle.ZIP"));
        assert!(!is_archive("Show.srt"));
        assert!(!is_archive("zip"));
    }
}
